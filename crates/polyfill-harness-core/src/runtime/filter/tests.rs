// crates/polyfill-harness-core/src/runtime/filter/tests.rs
// ============================================================================
// Module: Compatibility Filter Tests
// Description: Unit tests for per-descriptor inclusion decisions.
// Purpose: Validate publication gates and baseline range checks.
// Dependencies: polyfill-harness-core
// ============================================================================

//! ## Overview
//! Validates that the compatibility filter excludes unpublished,
//! untestable, and testless descriptors, and that baseline mode includes a
//! descriptor only when the baseline version satisfies its declared range
//! for the baseline family.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use semver::Version;

use super::is_composition_candidate;
use crate::core::BrowserBaseline;
use crate::core::FeatureDescriptor;
use crate::core::VersionRange;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn descriptor(name: &str, ranges: &[(&str, &str)]) -> FeatureDescriptor {
    let browser_support = ranges
        .iter()
        .map(|(family, range)| {
            ((*family).to_string(), VersionRange::parse(range).expect("valid range"))
        })
        .collect::<BTreeMap<_, _>>();
    FeatureDescriptor {
        name: name.to_string(),
        is_public: true,
        is_testable: true,
        has_tests: true,
        browser_support,
        detect_expression: "'feature' in window".to_string(),
    }
}

fn ie8_baseline() -> BrowserBaseline {
    BrowserBaseline::new("ie", Version::new(8, 0, 0))
}

// ============================================================================
// SECTION: Publication Gate Tests
// ============================================================================

#[test]
fn excludes_non_public_descriptors() {
    let mut desc = descriptor("Array.from", &[]);
    desc.is_public = false;
    assert!(!is_composition_candidate(&desc, None));
}

#[test]
fn excludes_untestable_descriptors() {
    let mut desc = descriptor("Array.from", &[]);
    desc.is_testable = false;
    assert!(!is_composition_candidate(&desc, None));
}

#[test]
fn excludes_descriptors_without_tests() {
    let mut desc = descriptor("Array.from", &[]);
    desc.has_tests = false;
    assert!(!is_composition_candidate(&desc, None));
}

#[test]
fn includes_candidates_without_baseline() {
    let desc = descriptor("Array.from", &[]);
    assert!(is_composition_candidate(&desc, None));
}

// ============================================================================
// SECTION: Baseline Tests
// ============================================================================

#[test]
fn baseline_includes_satisfied_range() {
    let desc = descriptor("Array.from", &[("ie", ">=7")]);
    assert!(is_composition_candidate(&desc, Some(&ie8_baseline())));
}

#[test]
fn baseline_excludes_unsatisfied_range() {
    let desc = descriptor("Array.from", &[("ie", ">=9")]);
    assert!(!is_composition_candidate(&desc, Some(&ie8_baseline())));
}

#[test]
fn baseline_excludes_missing_family_without_error() {
    let desc = descriptor("Array.from", &[("firefox", "*")]);
    assert!(!is_composition_candidate(&desc, Some(&ie8_baseline())));
}

#[test]
fn baseline_includes_hyphen_range_covering_version() {
    let desc = descriptor("Array.from", &[("ie", "7 - 9")]);
    assert!(is_composition_candidate(&desc, Some(&ie8_baseline())));
}

#[test]
fn baseline_includes_wildcard_range() {
    let desc = descriptor("Array.from", &[("ie", "*")]);
    assert!(is_composition_candidate(&desc, Some(&ie8_baseline())));
}

#[test]
fn publication_gate_precedes_baseline_check() {
    let mut desc = descriptor("Array.from", &[("ie", "*")]);
    desc.has_tests = false;
    assert!(!is_composition_candidate(&desc, Some(&ie8_baseline())));
}
