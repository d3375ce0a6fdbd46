// crates/polyfill-harness-core/tests/version_range_unit.rs
// ============================================================================
// Module: Version Range Unit Tests
// Description: Unit tests for catalog range parsing and matching.
// Purpose: Validate comparator, wildcard, and hyphen range forms.
// ============================================================================

//! Unit tests for version range parsing and baseline matching.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use polyfill_harness_core::VersionRange;
use polyfill_harness_core::VersionRangeError;
use semver::Version;

#[test]
fn comparator_range_matches_versions_at_or_above() {
    let range = VersionRange::parse(">=3.5").expect("valid range");
    assert!(range.matches(&Version::new(3, 5, 0)));
    assert!(range.matches(&Version::new(8, 0, 0)));
    assert!(!range.matches(&Version::new(3, 4, 9)));
}

#[test]
fn wildcard_range_matches_everything() {
    let range = VersionRange::parse("*").expect("valid range");
    assert!(range.matches(&Version::new(0, 0, 1)));
    assert!(range.matches(&Version::new(120, 0, 0)));
}

#[test]
fn hyphen_range_is_inclusive_on_both_ends() {
    let range = VersionRange::parse("4 - 6").expect("valid range");
    assert!(range.matches(&Version::new(4, 0, 0)));
    assert!(range.matches(&Version::new(6, 2, 1)));
    assert!(!range.matches(&Version::new(7, 0, 0)));
    assert!(!range.matches(&Version::new(3, 9, 9)));
}

#[test]
fn raw_text_is_preserved_for_display() {
    let range = VersionRange::parse("4 - 6").expect("valid range");
    assert_eq!(range.as_str(), "4 - 6");
    assert_eq!(range.to_string(), "4 - 6");
}

#[test]
fn empty_range_is_rejected() {
    let err = VersionRange::parse("   ").expect_err("empty range rejected");
    assert!(matches!(err, VersionRangeError::Invalid(_)));
}

#[test]
fn garbage_range_is_rejected() {
    assert!(VersionRange::parse("not a range").is_err());
}

#[test]
fn range_round_trips_through_serde() {
    let range = VersionRange::parse(">=7").expect("valid range");
    let text = serde_json::to_string(&range).expect("serializable range");
    assert_eq!(text, "\">=7\"");
    let parsed: VersionRange = serde_json::from_str(&text).expect("deserializable range");
    assert_eq!(parsed, range);
}
