// crates/polyfill-harness-server/src/render.rs
// ============================================================================
// Module: Page Rendering
// Description: Director and runner views over the composed page context.
// Purpose: Render the final HTML artifact for both top-level views.
// Dependencies: polyfill-harness-core
// ============================================================================

//! ## Overview
//! Two top-level views share the exact composed-page context: the runner
//! executes the suite and reports through the bridge; the director hosts the
//! runner in a frame and aggregates results through its
//! `receiveTestResults` callback. Bootstrap scripts install before the suite
//! executes, and the bridge installs its hooks before the framework run
//! starts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use polyfill_harness_core::ComposedPage;

// ============================================================================
// SECTION: Page Views
// ============================================================================

/// Top-level view selected by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Index page hosting the runner in a frame and aggregating results.
    Director,
    /// Test page executing the composed suite directly.
    Runner,
}

// ============================================================================
// SECTION: Runner View
// ============================================================================

/// Renders the runner page executing the composed suite.
#[must_use]
pub fn render_runner(page: &ComposedPage) -> String {
    let mut html = String::new();
    push_head(&mut html, "polyfill test runner", &page.styles);
    html.push_str("<body>\n<div id=\"mocha\"></div>\n");
    for script in &page.bootstrap_scripts {
        push_script(&mut html, script);
    }
    if let Some(bundle) = &page.preloaded_bundle {
        push_script(&mut html, bundle);
    }
    push_script(&mut html, &page.suite_source);
    push_script(&mut html, &page.reporting_script);
    html.push_str("</body>\n</html>\n");
    html
}

// ============================================================================
// SECTION: Director View
// ============================================================================

/// Aggregation script installed on the director page.
///
/// The framed runner reports through this callback when its run ends.
const DIRECTOR_SCRIPT: &str = r"window.receiveTestResults = function(features, results) {
  var row = document.createElement('tr');
  var cells = [
    features.join(','),
    String(results.passed),
    String(results.failed),
    String(results.total),
    results.uaString
  ];
  for (var i = 0; i < cells.length; i++) {
    var cell = document.createElement('td');
    cell.appendChild(document.createTextNode(cells[i]));
    row.appendChild(cell);
  }
  document.getElementById('results').appendChild(row);
};";

/// Renders the director page hosting the runner in a frame.
///
/// `runner_query` is the raw query string of the inbound request; it is
/// forwarded verbatim so the framed runner composes the same suite.
#[must_use]
pub fn render_director(page: &ComposedPage, runner_query: &str) -> String {
    let runner_src =
        if runner_query.is_empty() { "/test".to_string() } else { format!("/test?{runner_query}") };
    let mut html = String::new();
    push_head(&mut html, "polyfill test director", &page.styles);
    html.push_str("<body>\n<h1>polyfill test director</h1>\n");
    html.push_str(
        "<table>\n<thead>\n<tr><th>features</th><th>passed</th><th>failed</th><th>total</th>\
         <th>user agent</th></tr>\n</thead>\n<tbody id=\"results\"></tbody>\n</table>\n",
    );
    push_script(&mut html, DIRECTOR_SCRIPT);
    let _ = writeln!(html, "<iframe id=\"runner\" src=\"{runner_src}\"></iframe>");
    html.push_str("</body>\n</html>\n");
    html
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends the shared document head with inline styles.
fn push_head(html: &mut String, title: &str, styles: &str) {
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>\n{styles}\n</style>");
    html.push_str("</head>\n");
}

/// Appends one inline script element.
fn push_script(html: &mut String, script: &str) {
    let _ = writeln!(html, "<script>\n{script}\n</script>");
}

// ============================================================================
// SECTION: Tests
// ============================================================================
