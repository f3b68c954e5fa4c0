//! lbk-leads - Lead tracking service
//!
//! **Module Identity:**
//! - Name: lbk-leads
//! - Default port: 5727 (localhost only)
//!
//! Imports contact spreadsheets into a per-account lead corpus, tracks
//! to-do / in-progress / completed status per lead, and exports the working
//! set back to CSV.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lbk_common::config::{RootFolderInitializer, TomlConfig};
use lbk_common::SqliteStore;
use lbk_leads::config::ServiceConfig;
use lbk_leads::services::ImportOrchestrator;
use lbk_leads::session::SessionManager;
use lbk_leads::storage::CorpusStore;
use lbk_leads::AppState;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lbk-leads", version, about = "Lead tracking service")]
struct Args {
    /// HTTP port to listen on (localhost only)
    #[arg(long, env = "LEADBOOK_PORT")]
    port: Option<u16>,

    /// Folder holding the database
    #[arg(long, env = "LEADBOOK_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Step 1: Bootstrap configuration (TOML, then CLI/env overrides)
    let toml_config = TomlConfig::load_or_default(args.config.as_deref());
    let config = ServiceConfig::resolve(args.port, args.root_folder, &toml_config);

    // Step 2: Logging (RUST_LOG wins over the configured level)
    init_logging(&config)?;

    info!("Starting lbk-leads (Lead Tracker)");
    info!(
        "Version: {} ({}, {} build at {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    );
    config.log_summary();

    // Step 3: Root folder and database
    let initializer = RootFolderInitializer::new(config.root_folder.clone());
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let db_pool = lbk_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    // Step 4: Session (reopen the last signed-in account, if any)
    let store = CorpusStore::new(Arc::new(SqliteStore::new(db_pool)));
    let mut session = SessionManager::new(store, ImportOrchestrator::new(config.duplicate_policy));
    match session.restore().await {
        Ok(Some(account)) => info!(email = %account.email, "Restored session"),
        Ok(None) => info!("No previous session"),
        Err(e) => tracing::warn!(error = %e, "Could not restore previous session"),
    }

    // Step 5: Serve
    let app = lbk_leads::build_router(AppState::new(session));

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_logging(config: &ServiceConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
