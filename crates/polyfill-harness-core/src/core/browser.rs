// crates/polyfill-harness-core/src/core/browser.rs
// ============================================================================
// Module: Browser Tokens and Baselines
// Description: Canonical user-agent tokens and the legacy baseline pair.
// Purpose: Provide the family/version forms the endpoint compares against.
// Dependencies: semver, serde
// ============================================================================

//! ## Overview
//! User agents are normalized to a canonical `family/version` token before
//! any comparison. The legacy baseline is a fixed browser/version pair that,
//! when it matches the requester's token, enables baseline filtering of the
//! catalog. The baseline is injected from configuration rather than being a
//! hardcoded special case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use semver::Version;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: User-Agent Tokens
// ============================================================================

/// Neutral user-agent token accepted by every bundle builder.
pub const NEUTRAL_UA_TOKEN: &str = "other/0.0.0";

/// Canonical `family/version` user-agent token.
///
/// # Invariants
/// - `family` is a lowercase family label; unrecognized agents normalize to
///   the `other` family.
/// - `version` is a dotted version string padded to three components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UaToken {
    /// Browser family label.
    pub family: String,
    /// Normalized version string.
    pub version: String,
}

impl UaToken {
    /// Creates a token from family and version parts.
    #[must_use]
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }

    /// Returns the neutral token for unrecognized agents.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new("other", "0.0.0")
    }
}

impl fmt::Display for UaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.version)
    }
}

// ============================================================================
// SECTION: Legacy Baseline
// ============================================================================

/// Legacy baseline browser/version pair used to pre-filter the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserBaseline {
    /// Baseline browser family.
    pub family: String,
    /// Baseline browser version.
    pub version: Version,
}

impl BrowserBaseline {
    /// Creates a baseline pair.
    #[must_use]
    pub fn new(family: impl Into<String>, version: Version) -> Self {
        Self {
            family: family.into(),
            version,
        }
    }

    /// Returns true when the token identifies this baseline browser.
    #[must_use]
    pub fn matches_token(&self, token: &UaToken) -> bool {
        token.family == self.family && token.version == self.version.to_string()
    }
}

impl fmt::Display for BrowserBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.version)
    }
}
