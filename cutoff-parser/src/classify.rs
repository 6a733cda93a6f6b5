use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParserConfig;

/// Tagged classification of one raw OCR line. The reassembler switches on
/// this instead of re-matching ad hoc. Patterns are disjoint by
/// construction; classification still checks them in priority order so the
/// first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// 4-digit institute code, separator, name, optional `, district` tail.
    Institute { code: String, name: String, district: Option<String> },
    /// `Status:` line; the remainder is the institute status/affiliation.
    Status { text: String },
    /// Fixed-width (nominally) branch code, separator, branch name.
    Branch { code: String, name: String },
    /// One of the enumerated section phrases, matched literally.
    Section { label: String },
    /// `Stage` followed by raw seat-category tokens.
    SeatTypeRow { tokens: Vec<String> },
    /// Marker glyph followed by digit-group tokens.
    Rank { tokens: Vec<String> },
    /// One or more parenthesized decimal groups, parentheses stripped.
    Percentile { values: Vec<String> },
    /// Blank lines and stray artifacts; ignored.
    Other,
}

static RE_INSTITUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})\s*[-–]\s*(.+)$").expect("fixed pattern"));
static RE_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Status\s*:\s*(.+)$").expect("fixed pattern"));
static RE_BRANCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{5,})\s*[-–]\s*(.+)$").expect("fixed pattern"));
static RE_SEAT_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Stage\s+(.+)$").expect("fixed pattern"));
static RE_PERCENTILE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\(\s*[\d.]+\s*\)\s*)+$").expect("fixed pattern"));
static RE_PERCENTILE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*([\d.]+)\s*\)").expect("fixed pattern"));

/// Classify one line. Checked in spec priority order: institute, status,
/// branch, section, seat-type row, rank, percentile, other.
pub fn classify_line(line: &str, config: &ParserConfig) -> LineClass {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineClass::Other;
    }

    if let Some(caps) = RE_INSTITUTE.captures(trimmed) {
        let code = caps[1].to_string();
        let rest = caps[2].trim();
        // A trailing `, district` fragment is optional; OCR frequently
        // drops it, so its absence is not a failure.
        let (name, district) = match rest.rsplit_once(',') {
            Some((name, tail)) if !tail.trim().is_empty() && !name.trim().is_empty() => {
                (name.trim().to_string(), Some(tail.trim().to_string()))
            }
            _ => (rest.to_string(), None),
        };
        return LineClass::Institute { code, name, district };
    }

    if let Some(caps) = RE_STATUS.captures(trimmed) {
        return LineClass::Status { text: caps[1].trim().to_string() };
    }

    if let Some(caps) = RE_BRANCH.captures(trimmed) {
        return LineClass::Branch { code: caps[1].to_string(), name: caps[2].trim().to_string() };
    }

    if let Some(label) = config.section_labels.iter().find(|l| l.trim() == trimmed) {
        return LineClass::Section { label: label.clone() };
    }

    if let Some(caps) = RE_SEAT_ROW.captures(trimmed) {
        let tokens: Vec<String> = caps[1].split_whitespace().map(|t| t.to_string()).collect();
        if !tokens.is_empty() {
            return LineClass::SeatTypeRow { tokens };
        }
    }

    if let Some(tokens) = match_rank_line(trimmed, config) {
        return LineClass::Rank { tokens };
    }

    if RE_PERCENTILE_LINE.is_match(trimmed) {
        let values: Vec<String> = RE_PERCENTILE_GROUP
            .captures_iter(trimmed)
            .map(|c| c[1].trim().to_string())
            .collect();
        if !values.is_empty() {
            return LineClass::Percentile { values };
        }
    }

    LineClass::Other
}

/// Rank lines open with a single marker glyph (OCR variants of 'i'/'1' or
/// noise), then whitespace-separated digit groups. The marker set is
/// configuration, so this is matched structurally rather than by regex.
fn match_rank_line(trimmed: &str, config: &ParserConfig) -> Option<Vec<String>> {
    let mut parts = trimmed.split_whitespace();
    let marker = parts.next()?;
    let mut chars = marker.chars();
    let glyph = chars.next()?;
    if chars.next().is_some() || !config.stage_marker_chars.contains(&glyph) {
        return None;
    }
    let tokens: Vec<String> = parts.map(|t| t.to_string()).collect();
    if tokens.is_empty() || !tokens.iter().any(|t| t.chars().any(|c| c.is_ascii_digit())) {
        return None;
    }
    Some(tokens)
}
