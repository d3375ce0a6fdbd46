// crates/polyfill-harness-core/src/core/request.rs
// ============================================================================
// Module: Request Filters
// Description: Validated per-request composition filters.
// Purpose: Carry the endpoint's query parameters after validation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`RequestFilters`] is the validated form of one request's query
//! parameters. The endpoint produces it after enum validation; downstream
//! composition never re-validates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Request Filters
// ============================================================================

/// Validated composition filters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilters {
    /// Exact-match feature name filter; `None` accepts every catalog entry.
    pub feature: Option<String>,
    /// True when the page preloads a compatibility bundle.
    pub include_bundle: bool,
    /// True when the bundle request must use the neutral user agent and
    /// maximal-application flags.
    pub force_neutral_ua: bool,
}

impl RequestFilters {
    /// Returns the literal feature filter value used to build the suite.
    ///
    /// The reporting bridge is parameterized by this literal, which is the
    /// empty string when no filter was supplied.
    #[must_use]
    pub fn feature_literal(&self) -> &str {
        self.feature.as_deref().unwrap_or("")
    }
}
