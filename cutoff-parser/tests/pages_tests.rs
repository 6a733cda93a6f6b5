use cutoff_parser::pages::{split_pages, strip_boilerplate};

#[test]
fn dash_markers_split_into_numbered_pages() {
    let text = "\
--- Page 1 ---
1002 - Some College, Pune
Stage GOPEN
--- Page 2 ---
1003 - Other College, Nagpur
";
    let pages = split_pages(text);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert!(pages[0].text.starts_with("1002 -"));
    assert_eq!(pages[1].number, 2);
    assert!(pages[1].text.starts_with("1003 -"));
}

#[test]
fn tagged_markers_split_into_numbered_pages() {
    let text = "\
<PAGE1>
<CONTENT_FROM_OCR>
1002 - Some College, Pune
</CONTENT_FROM_OCR>
</PAGE1>
<PAGE2>
<CONTENT_FROM_OCR>
1003 - Other College, Nagpur
</CONTENT_FROM_OCR>
</PAGE2>
";
    let pages = split_pages(text);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[0].text, "1002 - Some College, Pune");
    assert_eq!(pages[1].number, 2);
    assert_eq!(pages[1].text, "1003 - Other College, Nagpur");
}

#[test]
fn unmarked_input_becomes_single_page() {
    let pages = split_pages("1002 - Some College, Pune\nStage GOPEN\n");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].number, 1);
}

#[test]
fn blank_input_yields_no_pages() {
    assert!(split_pages("   \n \n").is_empty());
}

#[test]
fn boilerplate_header_and_footer_are_stripped() {
    let text = "\
Government of Maharashtra
State Common Entrance Test Cell
Cut Off List for Maharashtra & Minority Seats of CAP Round | for Admission to First Year of Four Year
Degree Courses In Engineering and Technology for the Year 2023-24
1002 - Some College, Pune
Stage GOPEN
i 4500
Legends: Starting character G-General, L-Ladies, End character H-Home University
Maharashtra State Seats - Cut Off Indicates Maharashtra State General Merit No.; Figures in bracket Indicates Merit Percentile.
";
    let cleaned = strip_boilerplate(text);
    assert!(cleaned.starts_with("1002 -"), "header must be removed: {cleaned:?}");
    assert!(!cleaned.contains("Legends"), "footer must be removed: {cleaned:?}");
    assert!(cleaned.contains("i 4500"));
}

#[test]
fn strip_boilerplate_drops_blank_lines_only() {
    let cleaned = strip_boilerplate("1002 - Some College, Pune\n\n\nStage GOPEN\n");
    assert_eq!(cleaned, "1002 - Some College, Pune\nStage GOPEN");
}
