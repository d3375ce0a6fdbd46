// crates/polyfill-harness-server/src/lib.rs
// ============================================================================
// Module: Polyfill Harness Server Library
// Description: Public API surface for the harness HTTP endpoint.
// Purpose: Expose the server, request pipeline, and page rendering.
// Dependencies: crate::{bridge, render, server}
// ============================================================================

//! ## Overview
//! The harness server turns one inbound request into one rendered browser
//! test page or one structured 400 response. Requests are validated, the
//! catalog is filtered against an optional legacy baseline, suites are
//! composed deterministically, and the rendered page embeds the results
//! reporting bridge. Each request is independent; no state persists between
//! invocations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bridge;
pub mod render;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bridge::reporting_script;
pub use render::PageView;
pub use render::render_director;
pub use render::render_runner;
pub use server::HarnessServer;
pub use server::HarnessServerError;
pub use server::RequestError;
