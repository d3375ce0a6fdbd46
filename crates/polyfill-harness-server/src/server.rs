// crates/polyfill-harness-server/src/server.rs
// ============================================================================
// Module: Harness Endpoint
// Description: HTTP surface turning requests into rendered test pages.
// Purpose: Validate parameters, orchestrate composition, and render views.
// Dependencies: polyfill-harness-core, polyfill-harness-config, axum, tokio
// ============================================================================

//! ## Overview
//! The harness endpoint serves the director (`/`) and runner (`/test`)
//! views plus the framework assets and the full compatibility bundle. Query
//! parameters are validated fail-closed with literal error messages; the
//! catalog is filtered per request against an optional legacy baseline; and
//! every page embeds the results reporting bridge. Request inputs are
//! untrusted and validated at this boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::Query;
use axum::extract::RawQuery;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::header::USER_AGENT;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use polyfill_harness_config::AssetsConfig;
use polyfill_harness_config::HarnessConfig;
use polyfill_harness_core::BrowserBaseline;
use polyfill_harness_core::BundleBuilder;
use polyfill_harness_core::BundleRequest;
use polyfill_harness_core::CatalogAccessor;
use polyfill_harness_core::CatalogError;
use polyfill_harness_core::ComposedPage;
use polyfill_harness_core::FeatureDescriptor;
use polyfill_harness_core::NEUTRAL_UA_TOKEN;
use polyfill_harness_core::RequestFilters;
use polyfill_harness_core::TestSuiteRecord;
use polyfill_harness_core::compose_suites;
use polyfill_harness_core::is_composition_candidate;
use polyfill_harness_core::wrap_test_body;
use serde::Deserialize;

use crate::bridge::reporting_script;
use crate::render::PageView;
use crate::render::render_director;
use crate::render::render_runner;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Framework setup line installed after the framework scripts.
const FRAMEWORK_SETUP: &str = "mocha.setup('bdd');";
/// Content type for script assets.
const JS_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";
/// Content type for stylesheets.
const CSS_CONTENT_TYPE: &str = "text/css; charset=utf-8";

// ============================================================================
// SECTION: Harness Server
// ============================================================================

/// Harness HTTP server instance.
pub struct HarnessServer {
    /// Socket address the server binds to.
    bind: SocketAddr,
    /// Shared request-handler state.
    state: Arc<ServerState>,
}

impl HarnessServer {
    /// Builds a server from configuration and injected collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessServerError`] when the configuration is invalid.
    pub fn new(
        config: &HarnessConfig,
        catalog: Arc<dyn CatalogAccessor>,
        bundler: Arc<dyn BundleBuilder>,
    ) -> Result<Self, HarnessServerError> {
        let bind = config
            .server
            .bind_addr()
            .map_err(|err| HarnessServerError::Config(err.to_string()))?;
        let baseline = config
            .baseline
            .browser_baseline()
            .map_err(|err| HarnessServerError::Config(err.to_string()))?;
        Ok(Self {
            bind,
            state: Arc::new(ServerState {
                catalog,
                bundler,
                baseline,
                assets: config.assets.clone(),
            }),
        })
    }

    /// Builds the request router for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handle_director))
            .route("/test", get(handle_runner))
            .route("/mocha.js", get(handle_framework_script))
            .route("/proclaim.js", get(handle_assertion_script))
            .route("/mocha.css", get(handle_styles))
            .route("/polyfill.js", get(handle_full_bundle))
            .with_state(Arc::clone(&self.state))
    }

    /// Serves requests until the transport fails.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), HarnessServerError> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.bind)
            .await
            .map_err(|_| HarnessServerError::Transport("http bind failed".to_string()))?;
        tracing::info!("polyfill harness listening on http://{}", self.bind);
        axum::serve(listener, router)
            .await
            .map_err(|_| HarnessServerError::Transport("http server failed".to_string()))
    }
}

/// Shared state for request handlers.
struct ServerState {
    /// Read-only feature catalog accessor.
    catalog: Arc<dyn CatalogAccessor>,
    /// External bundle builder.
    bundler: Arc<dyn BundleBuilder>,
    /// Legacy baseline enabling catalog pre-filtering.
    baseline: BrowserBaseline,
    /// Framework asset locations.
    assets: AssetsConfig,
}

// ============================================================================
// SECTION: Query Parameters
// ============================================================================

/// Raw query parameters before enum validation.
#[derive(Debug, Default, Clone, Deserialize)]
struct RawQueryParams {
    /// Exact-match feature filter; an empty value behaves as unset.
    feature: Option<String>,
    /// Bundle preload switch, validated against yes/no.
    #[serde(rename = "includePolyfills")]
    include_polyfills: Option<String>,
    /// Maximal-application switch, validated against yes/no.
    always: Option<String>,
}

/// Validates one yes/no enum parameter, defaulting to no.
fn parse_yes_no(value: Option<&str>, parameter: &'static str) -> Result<bool, RequestError> {
    match value.unwrap_or("no") {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(RequestError::InvalidParameter(parameter)),
    }
}

/// Validates raw query parameters into request filters.
///
/// Both enums are validated independently so the error names the parameter
/// that failed.
fn parse_filters(params: RawQueryParams) -> Result<RequestFilters, RequestError> {
    let include_bundle = parse_yes_no(params.include_polyfills.as_deref(), "includePolyfills")?;
    let force_neutral_ua = parse_yes_no(params.always.as_deref(), "always")?;
    Ok(RequestFilters {
        feature: params.feature.filter(|name| !name.is_empty()),
        include_bundle,
        force_neutral_ua,
    })
}

// ============================================================================
// SECTION: Request Pipeline
// ============================================================================

/// Composes the page context for one validated request.
async fn compose_page(
    state: &ServerState,
    filters: &RequestFilters,
    ua: &str,
) -> Result<ComposedPage, RequestError> {
    let token = state.catalog.normalize_user_agent(ua);
    let baseline = state.baseline.matches_token(&token).then_some(&state.baseline);
    let descriptors = candidate_descriptors(state, filters.feature.as_deref(), baseline).await?;
    let mut records = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let test_body =
            state.catalog.test_source(&descriptor.name).await.map_err(upstream)?;
        records.push(TestSuiteRecord {
            feature: descriptor.name.clone(),
            suite_source: wrap_test_body(
                &descriptor.name,
                &descriptor.detect_expression,
                &test_body,
            ),
        });
    }
    let suite_source = compose_suites(records);
    if suite_source.is_empty() {
        return Err(RequestError::NoMatch);
    }
    let preloaded_bundle = if filters.include_bundle {
        let names = descriptors.into_iter().map(|descriptor| descriptor.name);
        Some(build_scoped_bundle(state, filters, names, ua).await?)
    } else {
        None
    };
    Ok(ComposedPage {
        bootstrap_scripts: load_bootstrap_scripts(&state.assets).await?,
        styles: read_asset(&state.assets.styles).await?,
        preloaded_bundle,
        suite_source,
        reporting_script: reporting_script(filters.feature_literal()),
    })
}

/// Runs the compatibility filter over every catalog entry.
async fn candidate_descriptors(
    state: &ServerState,
    feature_filter: Option<&str>,
    baseline: Option<&BrowserBaseline>,
) -> Result<Vec<FeatureDescriptor>, RequestError> {
    let names = state.catalog.list_all_polyfills().await.map_err(upstream)?;
    let mut descriptors = Vec::new();
    for name in names {
        if feature_filter.is_some_and(|filter| filter != name.as_str()) {
            continue;
        }
        let Some(descriptor) =
            state.catalog.describe_polyfill(&name).await.map_err(upstream)?
        else {
            continue;
        };
        if is_composition_candidate(&descriptor, baseline) {
            descriptors.push(descriptor);
        }
    }
    Ok(descriptors)
}

/// Builds the preloaded bundle scoped to exactly the filtered feature set.
///
/// Maximal application replaces the requester's user agent with the neutral
/// token and forces the always/gated flag pair.
async fn build_scoped_bundle(
    state: &ServerState,
    filters: &RequestFilters,
    names: impl IntoIterator<Item = String>,
    ua: &str,
) -> Result<String, RequestError> {
    let ua_string =
        if filters.force_neutral_ua { NEUTRAL_UA_TOKEN.to_string() } else { ua.to_string() };
    let request = BundleRequest::scoped(names, filters.force_neutral_ua, ua_string);
    state
        .bundler
        .build(&request)
        .await
        .map_err(|err| RequestError::Upstream(err.to_string()))
}

/// Loads the framework bootstrap scripts in install order.
async fn load_bootstrap_scripts(assets: &AssetsConfig) -> Result<Vec<String>, RequestError> {
    Ok(vec![
        read_asset(&assets.framework_script).await?,
        read_asset(&assets.assertion_script).await?,
        FRAMEWORK_SETUP.to_string(),
    ])
}

/// Reads one static asset file.
async fn read_asset(path: &Path) -> Result<String, RequestError> {
    tokio::fs::read_to_string(path).await.map_err(|err| {
        RequestError::Upstream(format!("asset unreadable: {} ({err})", path.display()))
    })
}

/// Maps a catalog failure onto the request-scoped upstream error.
fn upstream(err: CatalogError) -> RequestError {
    RequestError::Upstream(err.to_string())
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles the index/director view.
async fn handle_director(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RawQueryParams>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    render_view(&state, PageView::Director, params, query.as_deref().unwrap_or(""), &headers).await
}

/// Handles the runner view.
async fn handle_runner(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RawQueryParams>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    render_view(&state, PageView::Runner, params, query.as_deref().unwrap_or(""), &headers).await
}

/// Validates, composes, and renders one page request.
async fn render_view(
    state: &ServerState,
    view: PageView,
    params: RawQueryParams,
    query: &str,
    headers: &HeaderMap,
) -> Response {
    let ua = user_agent(headers);
    match page_for(state, view, params, query, ua).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            if matches!(err, RequestError::Upstream(_)) {
                tracing::warn!("page request failed: {err}");
            }
            err.into_response()
        }
    }
}

/// Produces the rendered HTML for one view.
async fn page_for(
    state: &ServerState,
    view: PageView,
    params: RawQueryParams,
    query: &str,
    ua: &str,
) -> Result<String, RequestError> {
    let filters = parse_filters(params)?;
    let page = compose_page(state, &filters, ua).await?;
    Ok(match view {
        PageView::Director => render_director(&page, query),
        PageView::Runner => render_runner(&page),
    })
}

/// Serves the test-framework script.
async fn handle_framework_script(State(state): State<Arc<ServerState>>) -> Response {
    asset_response(&state.assets.framework_script, JS_CONTENT_TYPE).await
}

/// Serves the assertion-library script.
async fn handle_assertion_script(State(state): State<Arc<ServerState>>) -> Response {
    asset_response(&state.assets.assertion_script, JS_CONTENT_TYPE).await
}

/// Serves the report stylesheet.
async fn handle_styles(State(state): State<Arc<ServerState>>) -> Response {
    asset_response(&state.assets.styles, CSS_CONTENT_TYPE).await
}

/// Serves one static asset with its content type.
async fn asset_response(path: &Path, content_type: &'static str) -> Response {
    match read_asset(path).await {
        Ok(body) => ([(CONTENT_TYPE, content_type)], body).into_response(),
        Err(err) => {
            tracing::warn!("asset request failed: {err}");
            err.into_response()
        }
    }
}

/// Serves the full compatibility bundle for every testable feature.
///
/// The bundle is compiled for the neutral user agent with no forced flags,
/// so every shim the catalog can test ships gated.
async fn handle_full_bundle(State(state): State<Arc<ServerState>>) -> Response {
    match full_bundle(&state).await {
        Ok(script) => ([(CONTENT_TYPE, JS_CONTENT_TYPE)], script).into_response(),
        Err(err) => {
            tracing::warn!("bundle request failed: {err}");
            err.into_response()
        }
    }
}

/// Builds the unfiltered full bundle.
async fn full_bundle(state: &ServerState) -> Result<String, RequestError> {
    let descriptors = candidate_descriptors(state, None, None).await?;
    let names = descriptors.into_iter().map(|descriptor| descriptor.name);
    let mut request = BundleRequest::scoped(names, false, NEUTRAL_UA_TOKEN);
    request.stream = true;
    state
        .bundler
        .build(&request)
        .await
        .map_err(|err| RequestError::Upstream(err.to_string()))
}

/// Extracts the requester's user-agent string.
fn user_agent(headers: &HeaderMap) -> &str {
    headers.get(USER_AGENT).and_then(|value| value.to_str().ok()).unwrap_or("")
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Harness server errors.
#[derive(Debug, thiserror::Error)]
pub enum HarnessServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Request-scoped failures mapped onto HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Enum query parameter outside the yes/no domain.
    #[error("{0} query parameter is an invalid value, it can only be 'yes' or 'no'.")]
    InvalidParameter(&'static str),
    /// Empty composed candidate set.
    #[error("no polyfills match the requested feature in the feature query parameter.")]
    NoMatch,
    /// Catalog, test-source, or bundle read failure.
    #[error("upstream read error: {0}")]
    Upstream(String),
}

impl RequestError {
    /// Returns the HTTP status for this failure.
    const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) | Self::NoMatch => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
