//! Splitting a raw OCR dump into page units and stripping the repeated
//! per-page boilerplate. OCR drivers emit one of two page-marker dialects:
//! `--- Page N ---` separators or `<PAGEn><CONTENT_FROM_OCR>` tag pairs.

use cutoff_model::Page;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_DASH_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^---\s*Page\s+(\d+)\s*---\s*$").expect("fixed pattern"));
static RE_TAG_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<PAGE(\d+)>").expect("fixed pattern"));
static RE_TAG_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<CONTENT_FROM_OCR>(.*?)</CONTENT_FROM_OCR>").expect("fixed pattern")
});

// The repeated scan header and the legend footer carry no row data and
// confuse the line classifier, so they are removed up front.
static RE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)Government of Maharashtra\s+State Common Entrance Test Cell.*?for the Year \d{4}-\d{2}\s*",
    )
    .expect("fixed pattern")
});
static RE_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)Legends\s*:.*?(?:Merit Percentile\s*\.?|$)",
    )
    .expect("fixed pattern")
});

/// Split a whole OCR dump into ordered pages. Recognizes both marker
/// dialects; input with no markers becomes a single page 1.
pub fn split_pages(text: &str) -> Vec<Page> {
    if RE_TAG_OPEN.is_match(text) {
        return split_tagged_pages(text);
    }

    let markers: Vec<(usize, usize, u32)> = RE_DASH_MARKER
        .captures_iter(text)
        .map(|c| {
            let m = c.get(0).expect("whole match");
            let number = c[1].parse().unwrap_or(0);
            (m.start(), m.end(), number)
        })
        .collect();
    if markers.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![Page::new(1, trimmed)];
    }

    let mut pages = Vec::with_capacity(markers.len());
    for (i, (_, body_start, number)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map(|m| m.0).unwrap_or(text.len());
        let body = text[*body_start..body_end].trim();
        if !body.is_empty() {
            pages.push(Page::new(*number, body));
        }
    }
    pages
}

fn split_tagged_pages(text: &str) -> Vec<Page> {
    let mut pages = Vec::new();
    for caps in RE_TAG_OPEN.captures_iter(text) {
        let number: u32 = caps[1].parse().unwrap_or(0);
        let after = &text[caps.get(0).expect("whole match").end()..];
        if let Some(content) = RE_TAG_CONTENT.captures(after) {
            let body = content[1].trim();
            if !body.is_empty() {
                pages.push(Page::new(number, body));
            }
        }
    }
    pages
}

/// Remove the repeated scan header and legend footer from one page's text
/// and drop blank-only lines, mirroring the cleanup the OCR driver applies
/// before extraction.
pub fn strip_boilerplate(text: &str) -> String {
    let without_header = RE_HEADER.replace_all(text, "");
    let without_footer = RE_FOOTER.replace_all(&without_header, "");
    without_footer
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
