// crates/polyfill-harness-core/src/runtime/composer.rs
// ============================================================================
// Module: Suite Composer
// Description: Deterministic test-suite assembly from included descriptors.
// Purpose: Wrap raw test bodies and concatenate suites in contract order.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The composer wraps each feature's raw test body inside a named suite
//! block whose first case asserts the feature detect, then concatenates the
//! suites in strict descending lexicographic order by feature name. The
//! ordering and the wrapper text are a byte-level contract; no other
//! component re-derives them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::TestSuiteRecord;

// ============================================================================
// SECTION: Suite Wrapping
// ============================================================================

/// Literal name of the leading detect test case in every suite.
pub const DETECT_CASE_NAME: &str = "passes the feature detect";

/// Wraps a raw test body inside a named suite block.
///
/// The first case asserts the detect expression evaluated in the page
/// context; the raw body follows unmodified.
#[must_use]
pub fn wrap_test_body(feature: &str, detect_expression: &str, test_body: &str) -> String {
    format!(
        "describe('{feature}', function() {{\n  it('{DETECT_CASE_NAME}', function() {{\n    \
         proclaim.ok((function() {{\n      return ({detect_expression});\n    \
         }}).call(window));\n  }});\n\n{test_body}\n}});"
    )
}

// ============================================================================
// SECTION: Suite Composition
// ============================================================================

/// Concatenates suite records in strict descending lexicographic order.
///
/// Feature names are unique, so the order is a strict total order with no
/// tie-break. An empty record set composes the empty string.
#[must_use]
pub fn compose_suites(mut records: Vec<TestSuiteRecord>) -> String {
    records.sort_by(|a, b| b.feature.cmp(&a.feature));
    records.iter().map(|record| record.suite_source.as_str()).collect::<Vec<_>>().join("\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
