use crate::ParserError;

/// Policy for percentile lists that are shorter than the rank list (or
/// absent). Source documents disagree across OCR eras, so this is
/// configuration rather than fixed behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentileFill {
    /// Emit `None` for the missing slots (default).
    Sentinel,
    /// Pad missing slots with `"0.00"`.
    ZeroFill,
    /// Truncate the row to the shortest of the three lists.
    Truncate,
}

/// Tunables for one parse session.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Canonical branch-code width. 7 for the editions this was built
    /// against; 9 in later ones. Mismatches are warnings, not errors.
    pub branch_code_width: usize,
    /// The section phrases recognized verbatim (trimmed) as section headers.
    pub section_labels: Vec<String>,
    /// Single characters accepted as the rank-line marker glyph.
    pub stage_marker_chars: Vec<char>,
    /// First serial number handed out by the session.
    pub serial_start: u32,
    pub percentile_fill: PercentileFill,
}

/// The five section phrases of the cutoff-list layout.
pub const DEFAULT_SECTION_LABELS: [&str; 5] = [
    "Home University Seats Allotted to Home University Candidates",
    "Other Than Home University Seats Allotted to Other Than Home University Candidates",
    "Home University Seats Allotted to Other Than Home University Candidates",
    "Other Than Home University Seats Allotted to Home University Candidates",
    "State Level",
];

/// Marker glyphs OCR produces for the row lead-in (variants of 'i'/'1' plus
/// noise glyphs seen in real scans).
pub const DEFAULT_STAGE_MARKERS: [char; 7] = ['i', 'I', '1', '|', '!', 'l', 'W'];

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            branch_code_width: 7,
            section_labels: DEFAULT_SECTION_LABELS.iter().map(|s| s.to_string()).collect(),
            stage_marker_chars: DEFAULT_STAGE_MARKERS.to_vec(),
            serial_start: 1,
            percentile_fill: PercentileFill::Sentinel,
        }
    }
}

impl ParserConfig {
    /// Contract check; a config that fails here aborts the session up front.
    pub fn validate(&self) -> Result<(), ParserError> {
        if self.branch_code_width == 0 {
            return Err(ParserError::InvalidConfig(
                "branch_code_width must be positive".into(),
            ));
        }
        if self.section_labels.is_empty() {
            return Err(ParserError::InvalidConfig("section_labels must not be empty".into()));
        }
        if self.stage_marker_chars.is_empty() {
            return Err(ParserError::InvalidConfig(
                "stage_marker_chars must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Convenience builder for the 9-digit branch-code editions.
    pub fn with_branch_code_width(width: usize) -> Self {
        Self { branch_code_width: width, ..Self::default() }
    }
}
