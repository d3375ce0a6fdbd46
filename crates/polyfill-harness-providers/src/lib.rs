// crates/polyfill-harness-providers/src/lib.rs
// ============================================================================
// Module: Polyfill Harness Providers
// Description: Concrete catalog and bundle-builder collaborators.
// Purpose: Provide filesystem and HTTP implementations of the core interfaces.
// Dependencies: polyfill-harness-core, reqwest, tokio, toml
// ============================================================================

//! ## Overview
//! This crate ships the directory-backed feature catalog, user-agent
//! normalization, and the HTTP bundle-builder client. Implementations are
//! read-only with respect to catalog data, enforce strict size limits on
//! untrusted responses, and fail closed on malformed metadata.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dir_catalog;
pub mod http;
pub mod ua;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dir_catalog::DirCatalog;
pub use http::HttpBundleBuilder;
pub use http::HttpBundleBuilderConfig;
pub use ua::normalize_user_agent;
