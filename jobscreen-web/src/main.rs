//! jobscreen-web - Job posting screening service
//!
//! Serves a form that accepts a job description or a link to one and
//! reports whether a pre-trained classifier considers the posting fake.
//!
//! Configuration priority: command line → environment → TOML file → defaults.

use anyhow::Result;
use clap::Parser;
use jobscreen_common::config::{Config, ConfigOverrides};
use jobscreen_web::{build_router, AppState};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "jobscreen-web", version, about = "Job posting screening service")]
struct Args {
    /// Classifier artifact (JSON)
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Vectorizer artifact (JSON)
    #[arg(long)]
    vectorizer_path: Option<PathBuf>,

    /// Key used to sign flash-message cookies
    #[arg(long)]
    secret_key: Option<String>,

    /// Listen address, e.g. 0.0.0.0:5002
    #[arg(long)]
    bind: Option<String>,

    /// Timeout for fetching job links, in seconds
    #[arg(long)]
    fetch_timeout: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            model_path: args.model_path,
            vectorizer_path: args.vectorizer_path,
            secret_key: args.secret_key,
            bind_addr: args.bind,
            fetch_timeout_secs: args.fetch_timeout,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting jobscreen-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::resolve(args.into())?;

    info!("Model artifact: {}", config.model_path.display());
    info!("Vectorizer artifact: {}", config.vectorizer_path.display());
    if config.uses_default_secret() {
        warn!("Using the built-in development secret key; set SECRET_KEY in production");
    }
    if !config.model_path.exists() || !config.vectorizer_path.exists() {
        // Artifacts are loaded per request, so this is not fatal
        warn!("Model artifacts not found yet; screening requests will fail until they exist");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("jobscreen-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
