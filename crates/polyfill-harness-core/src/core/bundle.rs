// crates/polyfill-harness-core/src/core/bundle.rs
// ============================================================================
// Module: Bundle Wire Shapes
// Description: Request payload for the external bundle builder.
// Purpose: Model the builder contract as an explicit structure.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The bundle builder is an external collaborator; only its request shape is
//! modeled here. The feature→flags mapping is produced once, up front, from
//! the filtered feature set rather than assembled through incremental
//! mutation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Bundle Flags
// ============================================================================

/// Application flags attached to a feature in a bundle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFlag {
    /// Include the shim even when the feature detect passes.
    Always,
    /// Wrap the shim in its feature-detect gate.
    Gated,
}

/// Per-feature options within a bundle request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBundleOptions {
    /// Application flags for the feature.
    pub flags: BTreeSet<BundleFlag>,
}

// ============================================================================
// SECTION: Bundle Request
// ============================================================================

/// Request payload sent to the bundle builder.
///
/// # Invariants
/// - `features` covers exactly the filtered feature set of the request that
///   produced it; no entry is added or removed afterwards.
/// - With maximal application, every feature carries the `always` and
///   `gated` flags and `ua_string` is the neutral token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleRequest {
    /// Feature set keyed by name with per-feature flags.
    pub features: BTreeMap<String, FeatureBundleOptions>,
    /// True when the builder should minify the script body.
    pub minify: bool,
    /// True when the builder may stream the script body.
    pub stream: bool,
    /// User-agent string the bundle is compiled for.
    pub ua_string: String,
}

impl BundleRequest {
    /// Builds a request scoped to the given feature names.
    ///
    /// When `maximal` is set, every feature carries the `always` and `gated`
    /// flags; otherwise the flag sets are empty.
    #[must_use]
    pub fn scoped(
        names: impl IntoIterator<Item = String>,
        maximal: bool,
        ua_string: impl Into<String>,
    ) -> Self {
        let flags = if maximal {
            BTreeSet::from([BundleFlag::Always, BundleFlag::Gated])
        } else {
            BTreeSet::new()
        };
        let features = names
            .into_iter()
            .map(|name| {
                (name, FeatureBundleOptions {
                    flags: flags.clone(),
                })
            })
            .collect();
        Self {
            features,
            minify: false,
            stream: false,
            ua_string: ua_string.into(),
        }
    }
}
