//! storsync - Storage Center → asset catalog inventory sync
//!
//! Loads configuration, logs in to Storage Manager, runs one full sync pass
//! and logs the run summary. Any hard failure exits non-zero without logging
//! out of the source session.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use storsync::catalog::{AssetCatalog, CatalogClient, DryRunCatalog};
use storsync::source::StorageManagerClient;
use storsync::Synchronizer;
use storsync_common::config::{resolve_config_path, TomlConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for storsync
#[derive(Parser, Debug)]
#[command(name = "storsync")]
#[command(about = "Sync Storage Center inventory into the asset catalog")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/storsync/storsync.toml)
    #[arg(short, long, env = "STORSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Fetch and map everything, log the records instead of uploading
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref())?;
    let config = TomlConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // RUST_LOG wins, then --log-level, then [logging] level
    let level = args.log_level.as_deref().unwrap_or(config.logging.level.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    info!(
        "Starting storsync v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Config: {}", config_path.display());

    let source = StorageManagerClient::connect(config.source.clone(), &config.http)
        .await
        .context("Failed to log in to Storage Manager")?;

    let catalog: Box<dyn AssetCatalog> = if args.dry_run {
        info!("Dry run: nothing will be uploaded");
        Box::new(DryRunCatalog::new())
    } else {
        Box::new(
            CatalogClient::new(config.catalog.clone(), &config.http)
                .context("Failed to create asset catalog client")?,
        )
    };

    let report = Synchronizer::new(&source, catalog.as_ref())
        .run()
        .await
        .context("Inventory sync aborted")?;
    report.log_summary();

    Ok(())
}
