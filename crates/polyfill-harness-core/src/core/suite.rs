// crates/polyfill-harness-core/src/core/suite.rs
// ============================================================================
// Module: Suite and Page Structures
// Description: Derived test-suite records and the composed page context.
// Purpose: Carry composition output from the pipeline to the render views.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`TestSuiteRecord`] pairs one feature with its wrapped suite source; a
//! [`ComposedPage`] is the full render context shared by the director and
//! runner views. Both are derived per request and never persisted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Suite Records
// ============================================================================

/// One feature's wrapped test suite, derived per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuiteRecord {
    /// Feature name the suite belongs to.
    pub feature: String,
    /// Wrapped suite source text.
    pub suite_source: String,
}

// ============================================================================
// SECTION: Composed Page
// ============================================================================

/// Render context shared by the director and runner views.
///
/// # Invariants
/// - `bootstrap_scripts` install before the suite executes.
/// - `reporting_script` registers its hooks before the framework run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPage {
    /// Test-framework bootstrap script texts, in install order.
    pub bootstrap_scripts: Vec<String>,
    /// Stylesheet text for the report surface.
    pub styles: String,
    /// Optional preloaded compatibility bundle script.
    pub preloaded_bundle: Option<String>,
    /// Concatenated suite source in composition order.
    pub suite_source: String,
    /// Embedded results-reporting bridge script.
    pub reporting_script: String,
}
