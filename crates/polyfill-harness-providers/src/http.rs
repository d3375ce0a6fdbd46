// crates/polyfill-harness-providers/src/http.rs
// ============================================================================
// Module: HTTP Bundle Builder Client
// Description: Bundle builder backed by a remote compilation endpoint.
// Purpose: Post bundle requests with strict timeout and size limits.
// Dependencies: polyfill-harness-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The HTTP bundle builder posts the JSON bundle request to a configured
//! endpoint and returns the compiled script body. Responses are bounded by a
//! hard byte ceiling enforced while reading, redirects are not followed, and
//! non-success statuses fail the build.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use polyfill_harness_core::BundleBuilder;
use polyfill_harness_core::BundleError;
use polyfill_harness_core::BundleRequest;
use reqwest::Client;
use reqwest::redirect::Policy;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP bundle builder.
///
/// # Invariants
/// - `max_response_bytes` is a hard upper bound on the script body.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBundleBuilderConfig {
    /// Builder endpoint URL.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum script body size allowed, in bytes.
    pub max_response_bytes: usize,
}

// ============================================================================
// SECTION: Builder Implementation
// ============================================================================

/// Bundle builder backed by a remote HTTP endpoint.
///
/// # Invariants
/// - Redirects are not followed.
/// - Script bodies exceeding the configured ceiling fail closed.
pub struct HttpBundleBuilder {
    /// Builder configuration, including limits.
    config: HttpBundleBuilderConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpBundleBuilder {
    /// Creates a new HTTP bundle builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the HTTP client cannot be created.
    pub fn new(config: HttpBundleBuilderConfig) -> Result<Self, BundleError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(|_| BundleError::Build("http client build failed".to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl BundleBuilder for HttpBundleBuilder {
    async fn build(&self, request: &BundleRequest) -> Result<String, BundleError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| BundleError::Build(format!("bundle request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BundleError::Build(format!("bundle builder returned status {status}")));
        }
        let body = read_body_limited(response, self.config.max_response_bytes).await?;
        String::from_utf8(body)
            .map_err(|_| BundleError::Build("bundle body must be utf-8".to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body while enforcing a byte limit.
async fn read_body_limited(
    mut response: reqwest::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, BundleError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| BundleError::Build("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(BundleError::Build("bundle response exceeds size limit".to_string()));
    }
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|err| BundleError::Build(format!("bundle read failed: {err}")))?
    {
        if body.len() + chunk.len() > max_bytes {
            return Err(BundleError::Build("bundle response exceeds size limit".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
