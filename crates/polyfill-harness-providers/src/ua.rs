// crates/polyfill-harness-providers/src/ua.rs
// ============================================================================
// Module: User-Agent Normalization
// Description: Canonical family/version tokens from raw user-agent strings.
// Purpose: Implement the catalog's normalizeUserAgent contract.
// Dependencies: polyfill-harness-core
// ============================================================================

//! ## Overview
//! Normalizes raw user-agent strings to the canonical `family/version`
//! token. Already-canonical tokens pass through with version padding; the
//! common desktop families are recognized from raw strings; everything else
//! maps to the neutral token. Mapping a token to a concrete device-farm
//! browser is a separate collaborator's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use polyfill_harness_core::UaToken;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Product markers checked in order; earlier entries win.
///
/// Edge precedes Chrome and Chrome precedes Safari because each later agent
/// embeds the earlier product tokens in its user-agent string.
const FAMILY_MARKERS: [(&str, &str); 4] =
    [("MSIE ", "ie"), ("Edge/", "edge"), ("Firefox/", "firefox"), ("Chrome/", "chrome")];

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a user-agent string to its canonical token.
#[must_use]
pub fn normalize_user_agent(ua: &str) -> UaToken {
    let trimmed = ua.trim();
    if trimmed.is_empty() {
        return UaToken::neutral();
    }
    if let Some(token) = canonical_token(trimmed) {
        return token;
    }
    for (marker, family) in FAMILY_MARKERS {
        if let Some(version) = version_after(trimmed, marker) {
            return UaToken::new(family, pad_version(&version));
        }
    }
    // IE 11 dropped the MSIE token; it identifies via Trident with rv:.
    if trimmed.contains("Trident/")
        && let Some(version) = version_after(trimmed, "rv:")
    {
        return UaToken::new("ie", pad_version(&version));
    }
    if trimmed.contains("Safari/")
        && let Some(version) = version_after(trimmed, "Version/")
    {
        return UaToken::new("safari", pad_version(&version));
    }
    UaToken::neutral()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses an already-canonical `family/version` token.
fn canonical_token(ua: &str) -> Option<UaToken> {
    let (family, version) = ua.split_once('/')?;
    let family_ok =
        !family.is_empty() && family.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_');
    let version_ok =
        !version.is_empty() && version.chars().all(|ch| ch.is_ascii_digit() || ch == '.');
    if family_ok && version_ok {
        Some(UaToken::new(family, pad_version(version)))
    } else {
        None
    }
}

/// Returns the dotted version digits directly following a marker.
fn version_after(ua: &str, marker: &str) -> Option<String> {
    let start = ua.find(marker)? + marker.len();
    let version: String = ua[start ..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

/// Pads a dotted version to exactly three numeric components.
fn pad_version(version: &str) -> String {
    let mut parts: Vec<String> = version
        .split('.')
        .take(3)
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() { "0".to_string() } else { digits }
        })
        .collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }
    parts.join(".")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
