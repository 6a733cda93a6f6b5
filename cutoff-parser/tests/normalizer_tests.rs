use cutoff_parser::normalize::{clean_rank_token, normalize_seat_type};
use cutoff_parser::CorrectionTable;

fn table() -> CorrectionTable {
    CorrectionTable::default()
}

#[test]
fn known_corrections_apply() {
    let t = table();
    assert_eq!(normalize_seat_type("EWWS", &t), "EWS");
    assert_eq!(normalize_seat_type("GNT10", &t), "GNT1O");
}

#[test]
fn trailing_punctuation_and_case_are_stripped() {
    let t = table();
    assert_eq!(normalize_seat_type("gopen:", &t), "GOPEN");
    assert_eq!(normalize_seat_type("GSCS;", &t), "GSCS");
    assert_eq!(normalize_seat_type("ews,", &t), "EWS");
    assert_eq!(normalize_seat_type("tfws.", &t), "TFWS");
}

#[test]
fn trailing_zero_repair_targets_category_shapes() {
    let t = table();
    // Optional G/L prefix, letter-led run, misread trailing zero.
    assert_eq!(normalize_seat_type("GVJ0", &t), "GVJO");
    assert_eq!(normalize_seat_type("LOPEN0", &t), "LOPENO");
    // Pure digit runs are not category codes and must not be rewritten.
    assert_eq!(normalize_seat_type("1000", &t), "1000");
}

#[test]
fn unknown_tokens_pass_through() {
    let t = table();
    assert_eq!(normalize_seat_type("ZZTOP", &t), "ZZTOP");
    assert_eq!(normalize_seat_type("", &t), "");
}

#[test]
fn normalization_is_idempotent() {
    let t = table();
    for raw in ["EWWS", "GNT10", "gopen:", "LOPEN0", "DEFOBC", "ews,", "1000", "ZZTOP"] {
        let once = normalize_seat_type(raw, &t);
        let twice = normalize_seat_type(&once, &t);
        assert_eq!(once, twice, "normalize must be idempotent for {raw:?}");
    }
}

#[test]
fn injected_table_entries_are_used() {
    let mut t = CorrectionTable::empty();
    t.add_seat_type("GOBX", "GOBC");
    assert_eq!(normalize_seat_type("gobx", &t), "GOBC");
    // Empty table still applies the structural repair.
    assert_eq!(normalize_seat_type("GNT10", &t), "GNT1O");
}

#[test]
fn rank_tokens_are_cleaned_to_digits() {
    let t = table();
    assert_eq!(clean_rank_token("4,500", &t).as_deref(), Some("4500"));
    assert_eq!(clean_rank_token("12O4", &t).as_deref(), Some("1204"));
    assert_eq!(clean_rank_token("l23", &t).as_deref(), Some("123"));
}

#[test]
fn rank_tokens_without_digits_yield_none() {
    let t = CorrectionTable::empty();
    assert_eq!(clean_rank_token("—", &t), None);
    assert_eq!(clean_rank_token("..", &t), None);
}
