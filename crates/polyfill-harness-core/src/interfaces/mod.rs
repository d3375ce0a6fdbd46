// crates/polyfill-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: Polyfill Harness Interfaces
// Description: Backend-agnostic interfaces for catalog access and bundling.
// Purpose: Define the collaborator contracts consumed by the harness endpoint.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the harness integrates with the feature catalog and
//! the external bundle builder without embedding backend-specific details.
//! Implementations are read-only with respect to catalog data and safe to
//! share across concurrent request handlers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::BundleRequest;
use crate::core::FeatureDescriptor;
use crate::core::UaToken;

// ============================================================================
// SECTION: Catalog Accessor
// ============================================================================

/// Catalog accessor errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog or test-source read failure.
    #[error("catalog read error: {0}")]
    Read(String),
    /// Feature metadata is malformed.
    #[error("catalog metadata error: {0}")]
    Metadata(String),
}

/// Read-only accessor over the feature catalog.
///
/// The catalog snapshot is stable for the lifetime of a request; accessors
/// never mutate catalog data and are shared across concurrent handlers.
#[async_trait]
pub trait CatalogAccessor: Send + Sync {
    /// Lists every feature identifier in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be enumerated.
    async fn list_all_polyfills(&self) -> Result<Vec<String>, CatalogError>;

    /// Returns the descriptor for a feature, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the feature's metadata cannot be read.
    async fn describe_polyfill(&self, name: &str)
    -> Result<Option<FeatureDescriptor>, CatalogError>;

    /// Returns the raw test-body text for a feature.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the test source cannot be read.
    async fn test_source(&self, name: &str) -> Result<String, CatalogError>;

    /// Normalizes a user-agent string to its canonical token.
    fn normalize_user_agent(&self, ua: &str) -> UaToken;
}

// ============================================================================
// SECTION: Bundle Builder
// ============================================================================

/// Bundle builder errors.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Bundle builder reported an error.
    #[error("bundle build error: {0}")]
    Build(String),
}

/// External bundle builder compiling a shim script for a feature set.
#[async_trait]
pub trait BundleBuilder: Send + Sync {
    /// Builds the bundle script body for the request.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the bundle cannot be built.
    async fn build(&self, request: &BundleRequest) -> Result<String, BundleError>;
}
