//! Shared models used across crates

use serde::{Deserialize, Serialize};

/// Sentinel used when a page does not state a district, status or name.
pub const UNKNOWN: &str = "Unknown";

/// One OCR-recognized page unit: a page number plus its raw text.
/// Produced by the OCR collaborator (or the page splitter); consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub text: String,
}

impl Page {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self { number, text: text.into() }
    }
}

/// A single reconstructed cutoff entry.
///
/// `rank` is a digit string after OCR cleaning; when a rank token yields no
/// digits it carries the raw token so positional alignment with seat types
/// survives. `percentile` is `None` when the source row had no percentile
/// for that slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffRecord {
    /// Document-wide running serial number, assigned at emission.
    pub serial: u32,
    /// Admission round within the current branch block (starts at 1).
    pub stage: u32,
    pub district: String,
    pub institute_status: String,
    pub institute_code: String,
    pub institute_name: String,
    pub branch_code: String,
    pub branch_name: String,
    pub seat_type: String,
    pub rank: String,
    pub percentile: Option<String>,
}

/// Result of parsing one page: zero or more records plus non-fatal warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutput {
    pub records: Vec<CutoffRecord>,
    pub warnings: Vec<String>,
}

/// Accumulated result of parsing an ordered sequence of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOutput {
    pub records: Vec<CutoffRecord>,
    /// Warnings in page order, each prefixed with its page number upstream.
    pub warnings: Vec<String>,
    pub pages_seen: u32,
}
