//! oracle-scan - Specimen photo service
//!
//! Upload a photo or capture one from the Raspberry Pi camera, record it in
//! the `scans` table, and view it back in the browser.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use oracle_common::config::TomlConfig;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oracle_scan::config::{ServiceConfig, MODULE_NAME};
use oracle_scan::{build_router, AppState};

/// Command-line arguments for oracle-scan
#[derive(Parser, Debug)]
#[command(name = "oracle-scan")]
#[command(about = "Specimen photo capture and catalog service")]
#[command(version)]
struct Args {
    /// Root folder holding oracle.db, images/ and specimens.json
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Address to listen on (default 0.0.0.0:8000)
    #[arg(short, long, env = "ORACLE_BIND")]
    bind: Option<String>,

    /// Explicit TOML config file
    #[arg(short, long, env = "ORACLE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read config before tracing so the file can set the log level;
    // its outcome is logged right after
    let loaded = TomlConfig::load_or_default(args.config.as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=info", loaded.config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification immediately after tracing init
    info!(
        "Starting {} v{} [{}] built {} ({})",
        MODULE_NAME,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    loaded.log_source();

    let config = ServiceConfig::resolve(args.root_folder, args.bind, loaded.config);

    // Root folder, images/ and images/thumbs/
    let root = config.root();
    root.ensure_directory_exists()
        .context("Failed to initialize root folder")?;
    root.ensure_image_dirs()
        .context("Failed to create image directories")?;
    info!("Root folder: {}", root.root_folder().display());

    let db_path = root.database_path();
    if !root.database_exists() {
        info!("Creating new database: {}", db_path.display());
    }
    let db_pool = oracle_common::db::init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    info!("Database: {}", db_path.display());

    let bind = config.bind.clone();
    let state = AppState::new(db_pool, config);
    match state.camera.locate() {
        Some(binary) => info!("Camera binary: {}", binary.display()),
        None => info!("No camera binary found; /capture will report an error"),
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("Listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
