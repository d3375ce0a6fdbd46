// crates/polyfill-harness-core/src/runtime/filter.rs
// ============================================================================
// Module: Compatibility Filter
// Description: Per-descriptor inclusion decision for suite composition.
// Purpose: Decide candidacy from publication state and an optional baseline.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The compatibility filter is a pure predicate over one descriptor and an
//! optional legacy baseline. A descriptor is a composition candidate iff it
//! is public, testable, and ships tests; under baseline mode it must also
//! declare a support range for the baseline family that the baseline version
//! satisfies. A missing family entry counts as unsupported, never as an
//! error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::BrowserBaseline;
use crate::core::FeatureDescriptor;

// ============================================================================
// SECTION: Compatibility Filter
// ============================================================================

/// Returns true when the descriptor may enter suite composition.
#[must_use]
pub fn is_composition_candidate(
    descriptor: &FeatureDescriptor,
    baseline: Option<&BrowserBaseline>,
) -> bool {
    if !descriptor.is_public || !descriptor.is_testable || !descriptor.has_tests {
        return false;
    }
    baseline.is_none_or(|baseline| {
        descriptor
            .browser_support
            .get(baseline.family.as_str())
            .is_some_and(|range| range.matches(&baseline.version))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
