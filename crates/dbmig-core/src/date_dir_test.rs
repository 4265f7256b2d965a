//! Tests for DateDir parsing, bounds, and ordering.

use crate::date_dir::DateDir;

const NOW: DateDir = DateDir::new(202608);

#[test]
fn parses_valid_cohort_names() {
    for name in ["202001", "202112", "202508", "202608"] {
        let parsed = DateDir::from_dir_name(name, NOW)
            .unwrap_or_else(|| panic!("{name} should parse"));
        assert_eq!(parsed.to_string(), name);
    }
}

#[test]
fn rejects_non_numeric_and_misshapen_names() {
    for name in ["2021-1", "2021-01", "notadate", "20210", "2021011", "20210a", ""] {
        assert!(
            DateDir::from_dir_name(name, NOW).is_none(),
            "{name} should not parse"
        );
    }
}

#[test]
fn rejects_months_outside_01_to_12() {
    assert!(DateDir::from_dir_name("202100", NOW).is_none());
    assert!(DateDir::from_dir_name("202113", NOW).is_none());
    assert!(DateDir::from_dir_name("202199", NOW).is_none());
}

#[test]
fn rejects_years_before_2020() {
    assert!(DateDir::from_dir_name("201912", NOW).is_none());
    assert!(DateDir::from_dir_name("200001", NOW).is_none());
}

#[test]
fn decade_bound_follows_now() {
    // In the 2020s a 2030s cohort is not even syntactically valid.
    assert!(DateDir::from_dir_name("203001", NOW).is_none());
    // Once the clock reaches the 2030s it is.
    assert!(DateDir::from_dir_name("203001", DateDir::new(203101)).is_some());
    assert!(DateDir::from_dir_name("202001", DateDir::new(203101)).is_some());
}

#[test]
fn ordering_is_chronological() {
    let a = DateDir::new(202509);
    let b = DateDir::new(202510);
    let c = DateDir::new(202601);
    assert!(a < b && b < c);
}

#[test]
fn is_due_respects_epoch_and_ceiling() {
    // At or before the epoch: never due.
    assert!(!DateDir::new(202508).is_due(NOW));
    assert!(!DateDir::new(202001).is_due(NOW));
    // In range.
    assert!(DateDir::new(202509).is_due(NOW));
    assert!(DateDir::new(202608).is_due(NOW));
    // Future-dated.
    assert!(!DateDir::new(202609).is_due(NOW));
}

#[test]
fn display_is_zero_padded() {
    assert_eq!(DateDir::new(202509).to_string(), "202509");
    assert_eq!(DateDir::new(99).to_string(), "000099");
}
