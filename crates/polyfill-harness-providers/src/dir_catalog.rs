// crates/polyfill-harness-providers/src/dir_catalog.rs
// ============================================================================
// Module: Directory-Backed Feature Catalog
// Description: Catalog accessor reading one directory per feature.
// Purpose: Serve descriptors from config.toml, detect.js, and tests.js files.
// Dependencies: polyfill-harness-core, tokio, toml
// ============================================================================

//! ## Overview
//! The directory catalog reads a root directory holding one subdirectory per
//! feature. Each feature carries `config.toml` (publication state, test
//! flags, browser support ranges), `detect.js` (the feature-detect
//! expression), and optionally `tests.js` (the raw test body). Catalog data
//! is read fresh per call and never cached or mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use polyfill_harness_core::CatalogAccessor;
use polyfill_harness_core::CatalogError;
use polyfill_harness_core::FeatureDescriptor;
use polyfill_harness_core::UaToken;
use polyfill_harness_core::VersionRange;
use serde::Deserialize;

use crate::ua::normalize_user_agent;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Feature metadata filename.
const CONFIG_FILE: &str = "config.toml";
/// Feature-detect expression filename.
const DETECT_FILE: &str = "detect.js";
/// Raw test-body filename; presence marks the feature as having tests.
const TESTS_FILE: &str = "tests.js";

// ============================================================================
// SECTION: Feature Metadata
// ============================================================================

/// Serde default for metadata booleans that default to true.
const fn default_true() -> bool {
    true
}

/// Test flags within feature metadata.
#[derive(Debug, Clone, Deserialize)]
struct TestMetadata {
    /// False when the feature is excluded from automated test passes.
    #[serde(default = "default_true")]
    ci: bool,
}

impl Default for TestMetadata {
    fn default() -> Self {
        Self {
            ci: true,
        }
    }
}

/// On-disk feature metadata; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
struct FeatureMetadata {
    /// False when the feature is unpublished.
    #[serde(default = "default_true")]
    public: bool,
    /// Test flags.
    #[serde(default)]
    test: TestMetadata,
    /// Declared support ranges keyed by browser family.
    #[serde(default)]
    browsers: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Directory Catalog
// ============================================================================

/// Catalog accessor backed by a feature directory tree.
#[derive(Debug, Clone)]
pub struct DirCatalog {
    /// Root directory holding one subdirectory per feature.
    root: PathBuf,
}

impl DirCatalog {
    /// Creates a catalog over the given root directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Returns the directory for a feature, or `None` for invalid names.
    fn feature_dir(&self, name: &str) -> Option<PathBuf> {
        if !is_valid_feature_name(name) {
            return None;
        }
        Some(self.root.join(name))
    }
}

#[async_trait]
impl CatalogAccessor for DirCatalog {
    async fn list_all_polyfills(&self) -> Result<Vec<String>, CatalogError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|err| CatalogError::Read(format!("catalog root unreadable: {err}")))?;
        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| CatalogError::Read(format!("catalog entry unreadable: {err}")))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|err| CatalogError::Read(format!("catalog entry unreadable: {err}")))?;
            if !file_type.is_dir() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string()
                && is_valid_feature_name(&name)
            {
                names.push(name);
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    async fn describe_polyfill(
        &self,
        name: &str,
    ) -> Result<Option<FeatureDescriptor>, CatalogError> {
        let Some(dir) = self.feature_dir(name) else {
            return Ok(None);
        };
        if !dir_exists(&dir).await {
            return Ok(None);
        }
        let metadata = read_metadata(&dir).await?;
        let has_tests = file_exists(&dir.join(TESTS_FILE)).await;
        let detect_expression = read_detect(&dir, name, has_tests).await?;
        let browser_support = parse_ranges(name, &metadata.browsers)?;
        Ok(Some(FeatureDescriptor {
            name: name.to_string(),
            is_public: metadata.public,
            is_testable: metadata.test.ci,
            has_tests,
            browser_support,
            detect_expression,
        }))
    }

    async fn test_source(&self, name: &str) -> Result<String, CatalogError> {
        let dir = self
            .feature_dir(name)
            .ok_or_else(|| CatalogError::Read(format!("invalid feature name: {name}")))?;
        tokio::fs::read_to_string(dir.join(TESTS_FILE))
            .await
            .map_err(|err| CatalogError::Read(format!("test source unreadable for {name}: {err}")))
    }

    fn normalize_user_agent(&self, ua: &str) -> UaToken {
        normalize_user_agent(ua)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for feature names safe to join onto the catalog root.
fn is_valid_feature_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.starts_with('_')
        && !name.contains('/')
        && !name.contains('\\')
        && name != ".."
}

/// Returns true when the path exists and is a directory.
async fn dir_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

/// Returns true when the path exists and is a file.
async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}

/// Reads and parses a feature's metadata file.
async fn read_metadata(dir: &Path) -> Result<FeatureMetadata, CatalogError> {
    let path = dir.join(CONFIG_FILE);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| CatalogError::Read(format!("{} unreadable: {err}", path.display())))?;
    toml::from_str(&content)
        .map_err(|err| CatalogError::Metadata(format!("{} malformed: {err}", path.display())))
}

/// Reads a feature's detect expression.
///
/// A feature that ships tests must ship a detect expression; without tests
/// the detect file is optional and defaults to the empty string.
async fn read_detect(dir: &Path, name: &str, has_tests: bool) -> Result<String, CatalogError> {
    match tokio::fs::read_to_string(dir.join(DETECT_FILE)).await {
        Ok(content) => Ok(content.trim().to_string()),
        Err(_) if !has_tests => Ok(String::new()),
        Err(err) => {
            Err(CatalogError::Metadata(format!("detect expression missing for {name}: {err}")))
        }
    }
}

/// Parses declared browser ranges into typed version ranges.
fn parse_ranges(
    name: &str,
    browsers: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, VersionRange>, CatalogError> {
    browsers
        .iter()
        .map(|(family, range)| {
            VersionRange::parse(range)
                .map(|parsed| (family.clone(), parsed))
                .map_err(|err| CatalogError::Metadata(format!("{name} [{family}]: {err}")))
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
