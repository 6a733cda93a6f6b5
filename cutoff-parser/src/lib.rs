//! Recovery of structured cutoff records from noisy OCR text.
//!
//! The pipeline is line-oriented: [`pages::split_pages`] turns a raw OCR
//! dump into [`Page`](cutoff_model::Page) units, and a [`ParseSession`]
//! walks each page's lines through the shared [`classify`] grammar,
//! normalizing tokens via [`normalize`] and reassembling flat
//! [`CutoffRecord`](cutoff_model::CutoffRecord)s.

pub mod classify;
pub mod config;
pub mod normalize;
pub mod pages;
pub mod reassemble;

pub use config::{ParserConfig, PercentileFill};
pub use normalize::CorrectionTable;
pub use reassemble::ParseSession;

/// Programming-contract violations; the only failures that abort a unit of
/// work. Structural misses in the OCR text are warnings, never errors.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),
    #[error("page {0} has no text")]
    EmptyPage(u32),
}
