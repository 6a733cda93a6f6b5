use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Known OCR confusions, injected as data so the tables can grow without
/// touching the state machine.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    /// Whole-token seat-type corrections, applied after uppercasing.
    seat_types: BTreeMap<String, String>,
    /// Literal substitutions applied to rank fragments before digit
    /// extraction.
    rank_fragments: Vec<(String, String)>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        let mut seat_types = BTreeMap::new();
        // Observed whole-token misreads.
        seat_types.insert("EWWS".to_string(), "EWS".to_string());
        seat_types.insert("EVVS".to_string(), "EWS".to_string());
        seat_types.insert("TFVVS".to_string(), "TFWS".to_string());
        seat_types.insert("GOPEM".to_string(), "GOPEN".to_string());
        seat_types.insert("LOPEM".to_string(), "LOPEN".to_string());
        let rank_fragments = vec![
            ("l".to_string(), "1".to_string()),
            ("I".to_string(), "1".to_string()),
            ("O".to_string(), "0".to_string()),
            ("o".to_string(), "0".to_string()),
            ("S".to_string(), "5".to_string()),
        ];
        Self { seat_types, rank_fragments }
    }
}

impl CorrectionTable {
    pub fn empty() -> Self {
        Self { seat_types: BTreeMap::new(), rank_fragments: Vec::new() }
    }

    pub fn add_seat_type(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.seat_types.insert(from.into(), to.into());
    }

    pub fn add_rank_fragment(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.rank_fragments.push((from.into(), to.into()));
    }
}

// Category codes end in a letter; OCR reads the final 'O' as digit '0'.
// Shape: optional G/L prefix, a letter-led run of up to four letters or
// digits, then the misread trailing zero.
static RE_TRAILING_ZERO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[GL]?[A-Z][A-Z0-9]{0,3}0$").expect("fixed pattern"));

/// Canonicalize one seat-category token. Pure; never fails; unknown tokens
/// pass through unchanged. Idempotent: corrected output is its own fixed
/// point.
pub fn normalize_seat_type(raw: &str, table: &CorrectionTable) -> String {
    let trimmed = raw.trim().trim_end_matches([':', ';', ',', '.']);
    let mut token = trimmed.to_uppercase();
    if let Some(fixed) = table.seat_types.get(&token) {
        token = fixed.clone();
    }
    if RE_TRAILING_ZERO.is_match(&token) {
        token.pop();
        token.push('O');
    }
    token
}

/// Clean one rank fragment: apply the literal substitution table, then keep
/// only digits (commas are thousands separators). Returns `None` when no
/// digits survive; the caller keeps the raw token in that slot and warns.
pub fn clean_rank_token(raw: &str, table: &CorrectionTable) -> Option<String> {
    let mut token = raw.to_string();
    for (from, to) in &table.rank_fragments {
        token = token.replace(from.as_str(), to.as_str());
    }
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
