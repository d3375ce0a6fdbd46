// crates/polyfill-harness-providers/src/dir_catalog/tests.rs
// ============================================================================
// Module: Directory Catalog Tests
// Description: Unit tests for the filesystem-backed catalog accessor.
// Purpose: Validate descriptor derivation from on-disk feature layouts.
// Dependencies: polyfill-harness-providers, tempfile
// ============================================================================

//! ## Overview
//! Builds throwaway catalog trees and validates listing order, descriptor
//! field derivation, and fail-closed behavior for malformed metadata.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use polyfill_harness_core::CatalogAccessor;
use polyfill_harness_core::CatalogError;
use semver::Version;

use super::DirCatalog;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn write_feature(root: &Path, name: &str, config: &str, detect: Option<&str>, tests: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("feature dir");
    fs::write(dir.join("config.toml"), config).expect("config file");
    if let Some(detect) = detect {
        fs::write(dir.join("detect.js"), detect).expect("detect file");
    }
    if let Some(tests) = tests {
        fs::write(dir.join("tests.js"), tests).expect("tests file");
    }
}

// ============================================================================
// SECTION: Listing Tests
// ============================================================================

#[tokio::test]
async fn lists_feature_directories_in_ascending_order() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("'Promise' in window"), Some("// t"));
    write_feature(root.path(), "Array.from", "", Some("'from' in Array"), Some("// t"));
    fs::write(root.path().join("README.md"), "not a feature").expect("stray file");
    let catalog = DirCatalog::new(root.path());
    let names = catalog.list_all_polyfills().await.expect("listable catalog");
    assert_eq!(names, vec!["Array.from".to_string(), "Promise".to_string()]);
}

#[tokio::test]
async fn listing_skips_hidden_and_underscore_directories() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("true"), None);
    fs::create_dir_all(root.path().join(".git")).expect("hidden dir");
    fs::create_dir_all(root.path().join("_build")).expect("underscore dir");
    let catalog = DirCatalog::new(root.path());
    let names = catalog.list_all_polyfills().await.expect("listable catalog");
    assert_eq!(names, vec!["Promise".to_string()]);
}

#[tokio::test]
async fn missing_root_fails_with_read_error() {
    let root = tempfile::tempdir().expect("temp dir");
    let catalog = DirCatalog::new(root.path().join("absent"));
    assert!(matches!(catalog.list_all_polyfills().await, Err(CatalogError::Read(_))));
}

// ============================================================================
// SECTION: Descriptor Tests
// ============================================================================

#[tokio::test]
async fn derives_descriptor_fields_from_feature_files() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(
        root.path(),
        "Array.from",
        "public = true\n\n[browsers]\nie = \">=7\"\nfirefox = \"4 - 6\"\n",
        Some("'from' in Array\n"),
        Some("it('works', function() {});"),
    );
    let catalog = DirCatalog::new(root.path());
    let descriptor = catalog
        .describe_polyfill("Array.from")
        .await
        .expect("describable feature")
        .expect("feature present");
    assert!(descriptor.is_public);
    assert!(descriptor.is_testable);
    assert!(descriptor.has_tests);
    assert_eq!(descriptor.detect_expression, "'from' in Array");
    let ie_range = descriptor.browser_support.get("ie").expect("ie range");
    assert!(ie_range.matches(&Version::new(8, 0, 0)));
}

#[tokio::test]
async fn metadata_defaults_mark_features_public_and_testable() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("'Promise' in window"), Some("// t"));
    let catalog = DirCatalog::new(root.path());
    let descriptor =
        catalog.describe_polyfill("Promise").await.expect("describable").expect("present");
    assert!(descriptor.is_public);
    assert!(descriptor.is_testable);
}

#[tokio::test]
async fn test_ci_false_marks_feature_untestable() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Intl", "[test]\nci = false\n", Some("'Intl' in self"), Some("//"));
    let catalog = DirCatalog::new(root.path());
    let descriptor = catalog.describe_polyfill("Intl").await.expect("describable").expect("present");
    assert!(!descriptor.is_testable);
}

#[tokio::test]
async fn feature_without_tests_reports_has_tests_false() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("'Promise' in window"), None);
    let catalog = DirCatalog::new(root.path());
    let descriptor =
        catalog.describe_polyfill("Promise").await.expect("describable").expect("present");
    assert!(!descriptor.has_tests);
}

#[tokio::test]
async fn unknown_feature_describes_as_absent() {
    let root = tempfile::tempdir().expect("temp dir");
    let catalog = DirCatalog::new(root.path());
    assert!(catalog.describe_polyfill("missing").await.expect("describable").is_none());
}

#[tokio::test]
async fn traversal_names_describe_as_absent() {
    let root = tempfile::tempdir().expect("temp dir");
    let catalog = DirCatalog::new(root.path());
    assert!(catalog.describe_polyfill("../etc").await.expect("describable").is_none());
}

#[tokio::test]
async fn malformed_metadata_fails_closed() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "public = \"maybe\"", Some("true"), Some("//"));
    let catalog = DirCatalog::new(root.path());
    assert!(matches!(
        catalog.describe_polyfill("Promise").await,
        Err(CatalogError::Metadata(_))
    ));
}

#[tokio::test]
async fn invalid_browser_range_fails_closed() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(
        root.path(),
        "Promise",
        "[browsers]\nie = \"not a range\"\n",
        Some("true"),
        Some("//"),
    );
    let catalog = DirCatalog::new(root.path());
    assert!(matches!(
        catalog.describe_polyfill("Promise").await,
        Err(CatalogError::Metadata(_))
    ));
}

#[tokio::test]
async fn tested_feature_without_detect_fails_closed() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", None, Some("// tests"));
    let catalog = DirCatalog::new(root.path());
    assert!(matches!(
        catalog.describe_polyfill("Promise").await,
        Err(CatalogError::Metadata(_))
    ));
}

// ============================================================================
// SECTION: Test Source Tests
// ============================================================================

#[tokio::test]
async fn reads_raw_test_source() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("true"), Some("it('resolves', noop);"));
    let catalog = DirCatalog::new(root.path());
    let source = catalog.test_source("Promise").await.expect("readable source");
    assert_eq!(source, "it('resolves', noop);");
}

#[tokio::test]
async fn missing_test_source_fails_with_read_error() {
    let root = tempfile::tempdir().expect("temp dir");
    write_feature(root.path(), "Promise", "", Some("true"), None);
    let catalog = DirCatalog::new(root.path());
    assert!(matches!(catalog.test_source("Promise").await, Err(CatalogError::Read(_))));
}
