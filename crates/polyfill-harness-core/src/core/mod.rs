// crates/polyfill-harness-core/src/core/mod.rs
// ============================================================================
// Module: Polyfill Harness Core Types
// Description: Canonical catalog, request, and page-composition structures.
// Purpose: Provide stable, serializable types shared by all harness crates.
// Dependencies: semver, serde
// ============================================================================

//! ## Overview
//! Core types describe polyfill catalog entries, request filters, bundle
//! wire shapes, and the composed test page. These types are the canonical
//! source of truth for the HTTP surface; every instance is constructed fresh
//! per request and discarded with the response.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod browser;
pub mod bundle;
pub mod descriptor;
pub mod request;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use browser::BrowserBaseline;
pub use browser::NEUTRAL_UA_TOKEN;
pub use browser::UaToken;
pub use bundle::BundleFlag;
pub use bundle::BundleRequest;
pub use bundle::FeatureBundleOptions;
pub use descriptor::FeatureDescriptor;
pub use descriptor::VersionRange;
pub use descriptor::VersionRangeError;
pub use request::RequestFilters;
pub use suite::ComposedPage;
pub use suite::TestSuiteRecord;
