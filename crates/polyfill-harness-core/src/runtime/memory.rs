// crates/polyfill-harness-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Fixtures
// Description: In-memory catalog and static bundle builder.
// Purpose: Exercise the composition pipeline without filesystem or network.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The in-memory catalog holds descriptors and test bodies directly and
//! normalizes only already-canonical `family/version` tokens; everything
//! else maps to the neutral token. The static bundle builder returns a fixed
//! script and records the last request it received so callers can assert on
//! bundle scoping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::BundleRequest;
use crate::core::FeatureDescriptor;
use crate::core::UaToken;
use crate::interfaces::BundleBuilder;
use crate::interfaces::BundleError;
use crate::interfaces::CatalogAccessor;
use crate::interfaces::CatalogError;

// ============================================================================
// SECTION: In-Memory Catalog
// ============================================================================

/// One in-memory catalog entry.
#[derive(Debug, Clone)]
pub struct InMemoryFeature {
    /// Feature descriptor.
    pub descriptor: FeatureDescriptor,
    /// Raw test-body text.
    pub test_source: String,
}

/// Catalog accessor backed by an in-memory map.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    /// Features keyed by name.
    features: BTreeMap<String, InMemoryFeature>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature and returns the catalog for chaining.
    #[must_use]
    pub fn with_feature(mut self, descriptor: FeatureDescriptor, test_source: &str) -> Self {
        self.features.insert(descriptor.name.clone(), InMemoryFeature {
            descriptor,
            test_source: test_source.to_string(),
        });
        self
    }
}

#[async_trait]
impl CatalogAccessor for InMemoryCatalog {
    async fn list_all_polyfills(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.features.keys().cloned().collect())
    }

    async fn describe_polyfill(
        &self,
        name: &str,
    ) -> Result<Option<FeatureDescriptor>, CatalogError> {
        Ok(self.features.get(name).map(|feature| feature.descriptor.clone()))
    }

    async fn test_source(&self, name: &str) -> Result<String, CatalogError> {
        self.features
            .get(name)
            .map(|feature| feature.test_source.clone())
            .ok_or_else(|| CatalogError::Read(format!("unknown feature: {name}")))
    }

    fn normalize_user_agent(&self, ua: &str) -> UaToken {
        match ua.split_once('/') {
            Some((family, version))
                if !family.is_empty()
                    && !version.is_empty()
                    && family.chars().all(|ch| ch.is_ascii_lowercase())
                    && version.chars().all(|ch| ch.is_ascii_digit() || ch == '.') =>
            {
                UaToken::new(family, version)
            }
            _ => UaToken::neutral(),
        }
    }
}

// ============================================================================
// SECTION: Static Bundle Builder
// ============================================================================

/// Bundle builder returning a fixed script body.
#[derive(Debug, Default)]
pub struct StaticBundleBuilder {
    /// Script body returned for every request.
    script: String,
    /// Last request received, for scoping assertions.
    last_request: Mutex<Option<BundleRequest>>,
}

impl StaticBundleBuilder {
    /// Creates a builder that returns the given script body.
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            last_request: Mutex::new(None),
        }
    }

    /// Returns the last request received, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<BundleRequest> {
        self.last_request.lock().map_or(None, |guard| guard.clone())
    }
}

#[async_trait]
impl BundleBuilder for StaticBundleBuilder {
    async fn build(&self, request: &BundleRequest) -> Result<String, BundleError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        Ok(self.script.clone())
    }
}
