// crates/polyfill-harness-core/src/runtime/composer/tests.rs
// ============================================================================
// Module: Suite Composer Tests
// Description: Unit tests for suite wrapping and composition order.
// Purpose: Pin the wrapper shape and the descending ordering contract.
// Dependencies: polyfill-harness-core
// ============================================================================

//! ## Overview
//! Validates the suite wrapper (leading detect case followed by the raw
//! body) and the strict descending lexicographic composition order.

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

use super::DETECT_CASE_NAME;
use super::compose_suites;
use super::wrap_test_body;
use crate::core::TestSuiteRecord;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn record(feature: &str) -> TestSuiteRecord {
    TestSuiteRecord {
        feature: feature.to_string(),
        suite_source: format!("suite:{feature}"),
    }
}

// ============================================================================
// SECTION: Wrapper Tests
// ============================================================================

#[test]
fn wrapper_opens_named_suite_block() {
    let suite = wrap_test_body("Array.from", "'from' in Array", "it('works', noop);");
    assert!(suite.starts_with("describe('Array.from', function() {"));
    assert!(suite.ends_with("});"));
}

#[test]
fn wrapper_leads_with_the_detect_case() {
    let suite = wrap_test_body("Array.from", "'from' in Array", "it('works', noop);");
    let detect_at = suite.find(DETECT_CASE_NAME).expect("detect case present");
    let body_at = suite.find("it('works', noop);").expect("body present");
    assert!(detect_at < body_at);
}

#[test]
fn wrapper_embeds_detect_expression_in_window_context() {
    let suite = wrap_test_body("Array.from", "'from' in Array", "");
    assert!(suite.contains("return ('from' in Array);"));
    assert!(suite.contains("}).call(window));"));
}

#[test]
fn wrapper_keeps_raw_body_unmodified() {
    let body = "it('keeps  spacing', function() {\n  proclaim.ok(true);\n});";
    let suite = wrap_test_body("Array.from", "true", body);
    assert!(suite.contains(body));
}

// ============================================================================
// SECTION: Ordering Tests
// ============================================================================

#[test]
fn composes_in_descending_lexicographic_order() {
    let composed = compose_suites(vec![record("a"), record("b"), record("c")]);
    assert_eq!(composed, "suite:c\nsuite:b\nsuite:a");
}

#[test]
fn composition_order_ignores_input_order() {
    let forward = compose_suites(vec![record("a"), record("b"), record("c")]);
    let shuffled = compose_suites(vec![record("b"), record("c"), record("a")]);
    assert_eq!(forward, shuffled);
}

#[test]
fn empty_candidate_set_composes_empty_source() {
    assert_eq!(compose_suites(Vec::new()), "");
}

#[test]
fn single_suite_composes_without_separator() {
    assert_eq!(compose_suites(vec![record("a")]), "suite:a");
}
