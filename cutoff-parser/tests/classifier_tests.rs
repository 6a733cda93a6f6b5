use cutoff_parser::classify::{classify_line, LineClass};
use cutoff_parser::ParserConfig;

fn config() -> ParserConfig {
    ParserConfig::default()
}

#[test]
fn institute_header_with_district() {
    let class = classify_line("1002 - Government College of Engineering, Amravati", &config());
    assert_eq!(
        class,
        LineClass::Institute {
            code: "1002".into(),
            name: "Government College of Engineering".into(),
            district: Some("Amravati".into()),
        }
    );
}

#[test]
fn institute_header_without_district() {
    let class = classify_line("1012 - COEP Technological University", &config());
    assert_eq!(
        class,
        LineClass::Institute {
            code: "1012".into(),
            name: "COEP Technological University".into(),
            district: None,
        }
    );
}

#[test]
fn status_line() {
    let class = classify_line("Status: Government Autonomous", &config());
    assert_eq!(class, LineClass::Status { text: "Government Autonomous".into() });
}

#[test]
fn branch_header_beats_nothing_and_institute_stays_four_digits() {
    let class = classify_line("1002101 - Civil Engineering", &config());
    assert_eq!(
        class,
        LineClass::Branch { code: "1002101".into(), name: "Civil Engineering".into() }
    );
    // An en-dash separator is equally valid OCR output.
    let class = classify_line("100219110 – Mechanical Engineering", &config());
    assert_eq!(
        class,
        LineClass::Branch { code: "100219110".into(), name: "Mechanical Engineering".into() }
    );
}

#[test]
fn section_headers_match_literally() {
    let cfg = config();
    for label in &cfg.section_labels {
        let class = classify_line(label, &cfg);
        assert_eq!(class, LineClass::Section { label: label.clone() });
    }
    assert_eq!(classify_line("State Level Extra Words", &cfg), LineClass::Other);
}

#[test]
fn seat_type_row() {
    let class = classify_line("Stage GOPEN LOPEN EWS TFWS", &config());
    assert_eq!(
        class,
        LineClass::SeatTypeRow {
            tokens: vec!["GOPEN".into(), "LOPEN".into(), "EWS".into(), "TFWS".into()]
        }
    );
}

#[test]
fn rank_line_accepts_configured_marker_glyphs() {
    let cfg = config();
    for marker in ["i", "I", "1", "|", "!", "l", "W"] {
        let line = format!("{marker} 1000 2,000 3000");
        let class = classify_line(&line, &cfg);
        assert_eq!(
            class,
            LineClass::Rank {
                tokens: vec!["1000".into(), "2,000".into(), "3000".into()]
            },
            "marker {marker:?} must classify as a rank line"
        );
    }
}

#[test]
fn rank_line_requires_digits_after_the_marker() {
    let cfg = config();
    assert_eq!(classify_line("i", &cfg), LineClass::Other);
    assert_eq!(classify_line("i abc def", &cfg), LineClass::Other);
}

#[test]
fn percentile_line() {
    let class = classify_line("(90.50) (88.20) (85.00)", &config());
    assert_eq!(
        class,
        LineClass::Percentile {
            values: vec!["90.50".into(), "88.20".into(), "85.00".into()]
        }
    );
}

#[test]
fn percentile_line_rejects_mixed_content() {
    assert_eq!(classify_line("(90.50) and text", &config()), LineClass::Other);
}

#[test]
fn noise_lines_are_other() {
    let cfg = config();
    assert_eq!(classify_line("", &cfg), LineClass::Other);
    assert_eq!(classify_line("   ", &cfg), LineClass::Other);
    assert_eq!(classify_line("~~ stray artifact ~~", &cfg), LineClass::Other);
}

#[test]
fn priority_institute_before_branch() {
    // Exactly four digits followed by the separator is an institute even
    // though the branch pattern would also accept longer codes.
    let class = classify_line("1002 - Name, District", &config());
    assert!(matches!(class, LineClass::Institute { .. }));
}
