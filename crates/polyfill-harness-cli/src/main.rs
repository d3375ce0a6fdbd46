// crates/polyfill-harness-cli/src/main.rs
// ============================================================================
// Module: Polyfill Harness CLI Entry Point
// Description: Command dispatcher for the harness server and config checks.
// Purpose: Wire configuration and providers into the harness endpoint.
// Dependencies: clap, polyfill-harness-{config, core, providers, server}, tokio
// ============================================================================

//! ## Overview
//! The harness CLI loads configuration, wires the directory catalog and the
//! HTTP bundle builder into the server, and serves the test harness. A
//! `check` command validates configuration without starting the server.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use polyfill_harness_config::ConfigError;
use polyfill_harness_config::HarnessConfig;
use polyfill_harness_core::BundleBuilder;
use polyfill_harness_core::BundleError;
use polyfill_harness_core::BundleRequest;
use polyfill_harness_providers::DirCatalog;
use polyfill_harness_providers::HttpBundleBuilder;
use polyfill_harness_providers::HttpBundleBuilderConfig;
use polyfill_harness_server::HarnessServer;
use polyfill_harness_server::HarnessServerError;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "polyfill-harness", version)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the harness test server.
    Serve(ServeCommand),
    /// Validate configuration and exit.
    Check(CheckCommand),
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the global tracing subscriber.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Executes the CLI command dispatcher.
async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Check(command) => command_check(&command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> Result<ExitCode, CliError> {
    let config = load_config(command.config.as_deref(), command.bind)?;
    let catalog = Arc::new(DirCatalog::new(config.catalog.root.clone()));
    let bundler = build_bundler(&config)?;
    let server = HarnessServer::new(&config, catalog, bundler)?;
    server.serve().await?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and applies the bind override.
fn load_config(
    path: Option<&std::path::Path>,
    bind: Option<String>,
) -> Result<HarnessConfig, CliError> {
    let mut config = HarnessConfig::load(path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
        config.server.validate()?;
    }
    Ok(config)
}

/// Selects the bundle builder from configuration.
///
/// Without a configured endpoint, bundle preloads fail per request while
/// plain test pages keep working.
fn build_bundler(config: &HarnessConfig) -> Result<Arc<dyn BundleBuilder>, CliError> {
    match &config.bundler.endpoint {
        Some(endpoint) => {
            let builder = HttpBundleBuilder::new(HttpBundleBuilderConfig {
                endpoint: endpoint.clone(),
                timeout_ms: config.bundler.timeout_ms,
                max_response_bytes: config.bundler.max_response_bytes,
            })?;
            Ok(Arc::new(builder))
        }
        None => Ok(Arc::new(DisabledBundleBuilder)),
    }
}

/// Bundle builder used when no endpoint is configured.
struct DisabledBundleBuilder;

#[async_trait]
impl BundleBuilder for DisabledBundleBuilder {
    async fn build(&self, _request: &BundleRequest) -> Result<String, BundleError> {
        Err(BundleError::Build("no bundle builder endpoint configured".to_string()))
    }
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command.
fn command_check(command: &CheckCommand) -> Result<ExitCode, CliError> {
    let config = HarnessConfig::load(command.config.as_deref())?;
    tracing::info!(
        "configuration valid: baseline {}, catalog {}",
        config.baseline.browser_baseline()?,
        config.catalog.root.display()
    );
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI errors surfaced to the operator.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Configuration loading or validation failed.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// Server construction or serving failed.
    #[error("{0}")]
    Server(#[from] HarnessServerError),
    /// Bundle builder construction failed.
    #[error("{0}")]
    Bundler(#[from] BundleError),
}
