//! intake-node: contact request intake server
//!
//! Serves the contact submission and admin retrieval API, and optionally the
//! site's static files.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use intake_node::{
    create_router, AdmissionGate, AppState, Clock, Config, SqliteRequestStore, SystemClock,
};

#[derive(Parser)]
#[command(name = "intake-node")]
#[command(about = "Contact request intake server")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "intake-node.toml")]
    config: String,

    /// Data directory
    #[arg(short, long, env = "INTAKE_DATA_DIR")]
    data_dir: Option<String>,

    /// HTTP port (overrides config file)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Directory of static site files
    #[arg(long, env = "INTAKE_STATIC_DIR")]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_node=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    info!("Starting intake-node");
    info!("Config file: {}", cli.config);

    let mut config = Config::load_or_default(Path::new(&cli.config))?;

    // Apply CLI overrides
    if let Some(data_dir) = cli.data_dir {
        config.node.data_dir = PathBuf::from(data_dir);
    }
    if let Some(port) = cli.port {
        config.api.http_port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        config.api.static_dir = Some(PathBuf::from(static_dir));
    }

    info!("Data dir: {}", config.node.data_dir.display());
    info!(
        window_secs = config.rate_limit.window_secs,
        max_requests = config.rate_limit.max_requests,
        "Admission gate configured"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = SqliteRequestStore::open(&config.db_path(), clock.clone())
        .context("opening request store")?;
    let gate = AdmissionGate::new(&config.rate_limit, clock);

    let state = AppState::new(Arc::new(gate), Arc::new(store));
    let app = create_router(state, config.api.static_dir.clone());

    let addr: SocketAddr = format!("{}:{}", config.api.bind_address, config.api.http_port)
        .parse()
        .context("parsing bind address")?;
    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
