// crates/polyfill-harness-core/src/core/descriptor.rs
// ============================================================================
// Module: Feature Descriptors
// Description: Catalog entry metadata and per-browser support ranges.
// Purpose: Provide the typed descriptor the compatibility filter consumes.
// Dependencies: semver, serde
// ============================================================================

//! ## Overview
//! A [`FeatureDescriptor`] is the catalog's view of one polyfill: its unique
//! name, publication and testability state, the browser families it declares
//! support ranges for, and the feature-detection expression evaluated in the
//! browser under test. Descriptors are read-only snapshots; the catalog is
//! never mutated through them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;
use semver::VersionReq;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Version Ranges
// ============================================================================

/// Version range parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionRangeError {
    /// The range expression could not be parsed.
    #[error("invalid version range: {0}")]
    Invalid(String),
}

/// Declared browser support range for one browser family.
///
/// # Invariants
/// - The original range text is preserved for display and serialization.
/// - Hyphen ranges (`"4 - 6"`) are accepted and normalized to a pair of
///   comparators; all other forms are parsed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    /// Range text as declared in catalog metadata.
    raw: String,
    /// Parsed comparator set used for baseline checks.
    req: VersionReq,
}

impl VersionRange {
    /// Parses a catalog range expression.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRangeError`] when the expression is not a valid
    /// range.
    pub fn parse(raw: &str) -> Result<Self, VersionRangeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VersionRangeError::Invalid("empty range".to_string()));
        }
        let normalized = trimmed.split_once(" - ").map_or_else(
            || trimmed.to_string(),
            |(low, high)| format!(">={}, <={}", low.trim(), high.trim()),
        );
        let req = VersionReq::parse(&normalized)
            .map_err(|err| VersionRangeError::Invalid(err.to_string()))?;
        Ok(Self {
            raw: trimmed.to_string(),
            req,
        })
    }

    /// Returns true when the version satisfies the range.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// Returns the range text as declared in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(value: VersionRange) -> Self {
        value.raw
    }
}

// ============================================================================
// SECTION: Feature Descriptor
// ============================================================================

/// Catalog entry for one polyfill.
///
/// # Invariants
/// - `name` is unique within a catalog snapshot.
/// - A descriptor is a composition candidate iff `is_public`, `is_testable`,
///   and `has_tests` all hold; baseline filtering applies on top of that.
/// - A browser family absent from `browser_support` counts as unsupported,
///   never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// Unique feature name.
    pub name: String,
    /// True when the feature is published for external use.
    pub is_public: bool,
    /// True when the feature may run in automated test passes.
    pub is_testable: bool,
    /// True when the feature ships a test body.
    pub has_tests: bool,
    /// Declared support ranges keyed by browser family.
    pub browser_support: BTreeMap<String, VersionRange>,
    /// In-browser boolean predicate, true when the native capability exists.
    pub detect_expression: String,
}
