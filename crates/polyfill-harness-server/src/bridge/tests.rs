// crates/polyfill-harness-server/src/bridge/tests.rs
// ============================================================================
// Module: Reporting Bridge Tests
// Description: Unit tests for the generated bridge script.
// Purpose: Pin the bridge's event contract and parameterization.
// Dependencies: polyfill-harness-server
// ============================================================================

//! ## Overview
//! Validates the generated bridge script: the four named handlers, the
//! result-object shape, the hosting-frame callback, and feature-literal
//! escaping.

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

use super::reporting_script;

// ============================================================================
// SECTION: Contract Tests
// ============================================================================

#[test]
fn registers_four_named_handlers_against_the_runner() {
    let script = reporting_script("");
    assert!(script.contains("runner.on('pass', onPass);"));
    assert!(script.contains("runner.on('fail', onFail);"));
    assert!(script.contains("runner.on('suite', onSuiteStart);"));
    assert!(script.contains("runner.on('end', onEnd);"));
}

#[test]
fn publishes_results_on_the_well_known_global() {
    let script = reporting_script("");
    assert!(script.contains("window.global_test_results = results;"));
}

#[test]
fn result_object_carries_the_normalized_shape() {
    let script = reporting_script("");
    for field in
        ["state: 'complete'", "passed: 0", "failed: 0", "total: 0", "duration: 0", "tests: []"]
    {
        assert!(script.contains(field), "missing field: {field}");
    }
    assert!(script.contains("failingSuites: {}"));
    assert!(script.contains("testedSuites: []"));
}

#[test]
fn ua_string_falls_back_to_the_unknown_literal() {
    let script = reporting_script("");
    assert!(script.contains("window.navigator.userAgent || 'unknown'"));
}

#[test]
fn invokes_the_hosting_frame_callback_with_the_feature_list() {
    let script = reporting_script("Array.from");
    assert!(script.contains("parent.receiveTestResults(featureList, results);"));
    assert!(script.contains("var featureList = ['Array.from'];"));
}

#[test]
fn empty_filter_renders_an_empty_literal() {
    let script = reporting_script("");
    assert!(script.contains("var featureList = [''];"));
}

#[test]
fn feature_literal_is_escaped_for_js_embedding() {
    let script = reporting_script("O'Brien\\<test>");
    assert!(script.contains("var featureList = ['O\\'Brien\\\\\\x3ctest>'];"));
}

#[test]
fn first_level_suite_walker_stops_one_level_below_the_root() {
    let script = reporting_script("");
    assert!(script.contains("while (node && node.parent && node.parent.parent) {"));
}

#[test]
fn failures_record_message_stack_and_failing_suite() {
    let script = reporting_script("");
    assert!(script.contains("message: err.message"));
    assert!(script.contains("stack: err.stack"));
    assert!(script.contains("failingSuite: getFirstLevelSuite(test)"));
}
