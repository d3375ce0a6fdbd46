// crates/polyfill-harness-server/src/bridge.rs
// ============================================================================
// Module: Result Reporting Bridge
// Description: In-browser script surfacing normalized test results.
// Purpose: Generate the bridge script embedded in every rendered page.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The reporting bridge runs in the browser after the suite executes. It
//! registers four named handlers against the test framework's run events,
//! attributes failures to their first-level suite, publishes the normalized
//! result object on a well-known global, and hands it to a hosting frame
//! when one exposes `receiveTestResults`. The bridge never throws; framework
//! failures reach it through the hooks, and the `end` hook fires last,
//! exactly once per run.

// ============================================================================
// SECTION: Bridge Template
// ============================================================================

/// Bridge script body with a placeholder for the feature-filter literal.
///
/// Handler firing order follows the framework's emission order: pass, fail,
/// and suite events interleave during the run and `end` always fires last.
const BRIDGE_TEMPLATE: &str = r#"// Surface the test results in the device farm's preferred format.
function run() {
  // Given a test, get the first-level suite containing it: not the root,
  // the one immediately below it.
  function getFirstLevelSuite(test) {
    var node = test;
    while (node && node.parent && node.parent.parent) {
      node = node.parent;
    }
    return node.title;
  }
  var results = {
    state: 'complete',
    passed: 0,
    failed: 0,
    total: 0,
    duration: 0,
    tests: [],
    failingSuites: {},
    testedSuites: [],
    uaString: window.navigator.userAgent || 'unknown'
  };
  function onPass(test) {
    results.passed++;
    results.total++;
  }
  function onFail(test, err) {
    if (test.parent) {
      results.failingSuites[getFirstLevelSuite(test)] = true;
    }
    results.failed++;
    results.total++;
    results.tests.push({
      name: test.fullTitle(),
      result: false,
      message: err.message,
      stack: err.stack,
      failingSuite: getFirstLevelSuite(test)
    });
  }
  function onSuiteStart(suite) {
    results.testedSuites.push(getFirstLevelSuite(suite));
  }
  function onEnd() {
    window.global_test_results = results;
    if (parent && parent.receiveTestResults) {
      var featureList = ['@@FEATURE_FILTER@@'];
      parent.receiveTestResults(featureList, results);
    }
  }
  var runner = mocha.run();
  runner.on('pass', onPass);
  runner.on('fail', onFail);
  runner.on('suite', onSuiteStart);
  runner.on('end', onEnd);
}
run();"#;

/// Placeholder replaced with the escaped feature-filter literal.
const FEATURE_PLACEHOLDER: &str = "@@FEATURE_FILTER@@";

// ============================================================================
// SECTION: Script Generation
// ============================================================================

/// Returns the bridge script parameterized by the feature-filter literal.
///
/// The literal is the exact `feature` query value used to build the suite,
/// or the empty string when no filter was supplied.
#[must_use]
pub fn reporting_script(feature_literal: &str) -> String {
    BRIDGE_TEMPLATE.replace(FEATURE_PLACEHOLDER, &escape_js_literal(feature_literal))
}

/// Escapes a value for embedding inside a single-quoted JS string literal.
fn escape_js_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '<' => escaped.push_str("\\x3c"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
