//! Tokio / Axum entry-point for the Mergington activities service.
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use backend_lib::{config::Settings, router, telemetry, AppState};
use clap::Parser;
use tokio::net::TcpListener;

/// Extracurricular activity signup server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file
    #[arg(short, long, default_value = backend_lib::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the static asset directory
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Override the activity catalog file
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(bind) = self.bind {
            settings.bind_addr = bind;
        }
        if let Some(dir) = self.static_dir {
            settings.static_dir = dir;
        }
        if let Some(catalog) = self.catalog {
            settings.catalog_path = Some(catalog);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize configuration
    let mut settings = Settings::load_from(&args.config)?;
    args.apply(&mut settings);

    // Initialize tracing
    telemetry::init_tracing(&settings)?;

    // Create application state
    let state = AppState::from_settings(settings).context("failed to seed roster")?;
    let addr = state.settings.bind_addr;
    tracing::info!(
        custom_catalog = state.settings.catalog_path.is_some(),
        static_dir = %state.settings.static_dir.display(),
        "configuration loaded"
    );

    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
