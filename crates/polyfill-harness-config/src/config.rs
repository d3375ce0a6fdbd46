// crates/polyfill-harness-config/src/config.rs
// ============================================================================
// Module: Polyfill Harness Configuration
// Description: Configuration loading and validation for the harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: polyfill-harness-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. The legacy baseline browser/version is configured here rather
//! than hardcoded; the default (`ie` / `8.0.0`) preserves the harness's
//! historical behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use polyfill_harness_core::BrowserBaseline;
use semver::Version;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "polyfill-harness.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "POLYFILL_HARNESS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default server bind address; the harness's historical port.
const DEFAULT_BIND: &str = "127.0.0.1:9876";
/// Default baseline browser family.
const DEFAULT_BASELINE_FAMILY: &str = "ie";
/// Default baseline browser version.
const DEFAULT_BASELINE_VERSION: &str = "8.0.0";
/// Minimum bundler request timeout in milliseconds.
pub(crate) const MIN_BUNDLER_TIMEOUT_MS: u64 = 100;
/// Maximum bundler request timeout in milliseconds.
pub(crate) const MAX_BUNDLER_TIMEOUT_MS: u64 = 120_000;
/// Default bundler request timeout in milliseconds.
const DEFAULT_BUNDLER_TIMEOUT_MS: u64 = 10_000;
/// Maximum bundle response size allowed, in bytes.
pub(crate) const MAX_BUNDLER_RESPONSE_BYTES: usize = 64 * 1024 * 1024;
/// Default maximum bundle response size in bytes.
const DEFAULT_BUNDLER_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Root
// ============================================================================

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Legacy baseline browser settings.
    #[serde(default)]
    pub baseline: BaselineConfig,
    /// Feature catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Test-framework asset locations.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Bundle builder client settings.
    #[serde(default)]
    pub bundler: BundlerConfig,
}

impl HarnessConfig {
    /// Loads configuration from the given path or environment defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.baseline.validate()?;
        self.catalog.validate()?;
        self.assets.validate()?;
        self.bundler.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server Settings
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl ServerConfig {
    /// Validates server settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr().map(|_| ())
    }

    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address is invalid.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid bind address: {}", self.bind)))
    }
}

// ============================================================================
// SECTION: Baseline Settings
// ============================================================================

/// Legacy baseline browser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Baseline browser family label.
    pub family: String,
    /// Baseline browser version.
    pub version: String,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            family: DEFAULT_BASELINE_FAMILY.to_string(),
            version: DEFAULT_BASELINE_VERSION.to_string(),
        }
    }
}

impl BaselineConfig {
    /// Validates baseline settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the family or version is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.family.is_empty()
            || !self.family.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        {
            return Err(ConfigError::Invalid(format!(
                "baseline family must be lowercase ascii: {}",
                self.family
            )));
        }
        self.browser_baseline().map(|_| ())
    }

    /// Returns the typed baseline pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the version is not a full semver
    /// version.
    pub fn browser_baseline(&self) -> Result<BrowserBaseline, ConfigError> {
        let version = Version::parse(&self.version).map_err(|_| {
            ConfigError::Invalid(format!("invalid baseline version: {}", self.version))
        })?;
        Ok(BrowserBaseline::new(self.family.clone(), version))
    }
}

// ============================================================================
// SECTION: Catalog Settings
// ============================================================================

/// Feature catalog location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root directory holding one subdirectory per feature.
    pub root: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("polyfills"),
        }
    }
}

impl CatalogConfig {
    /// Validates catalog settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the root path is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path(&self.root)
    }
}

// ============================================================================
// SECTION: Asset Settings
// ============================================================================

/// Test-framework asset locations served into every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Test-framework script path (mocha.js).
    pub framework_script: PathBuf,
    /// Assertion-library script path (proclaim.js).
    pub assertion_script: PathBuf,
    /// Report stylesheet path (mocha.css).
    pub styles: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            framework_script: PathBuf::from("assets/mocha.js"),
            assertion_script: PathBuf::from("assets/proclaim.js"),
            styles: PathBuf::from("assets/mocha.css"),
        }
    }
}

impl AssetsConfig {
    /// Validates asset settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any asset path is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path(&self.framework_script)?;
        validate_path(&self.assertion_script)?;
        validate_path(&self.styles)
    }
}

// ============================================================================
// SECTION: Bundler Settings
// ============================================================================

/// Bundle builder client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Builder endpoint URL; absent disables bundle preloading.
    pub endpoint: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum bundle response size in bytes.
    pub max_response_bytes: usize,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_BUNDLER_TIMEOUT_MS,
            max_response_bytes: DEFAULT_BUNDLER_RESPONSE_BYTES,
        }
    }
}

impl BundlerConfig {
    /// Validates bundler settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when limits are out of bounds or the
    /// endpoint is malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < MIN_BUNDLER_TIMEOUT_MS || self.timeout_ms > MAX_BUNDLER_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "bundler timeout_ms must be between {MIN_BUNDLER_TIMEOUT_MS} and \
                 {MAX_BUNDLER_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_BUNDLER_RESPONSE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "bundler max_response_bytes must be between 1 and {MAX_BUNDLER_RESPONSE_BYTES}"
            )));
        }
        if let Some(endpoint) = &self.endpoint
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "bundler endpoint must be an http(s) url: {endpoint}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against component and total-length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return Err(ConfigError::Invalid("path must not be empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
