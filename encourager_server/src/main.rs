//! Encourager verse lookup service

use anyhow::{Context, Result};
use clap::Parser;
use encourager_core::{Catalog, Config};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "encourager-server")]
#[command(about = "Serves inspirational verses over HTTP", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Allowed cross-origin caller (`*` for any)
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// JSON catalog to serve instead of the built-in verses
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Config file (defaults to the standard location)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    encourager_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };

    let bind = cli.bind.unwrap_or(config.server.bind);
    let allowed_origin = cli
        .allowed_origin
        .unwrap_or_else(|| config.server.allowed_origin.clone());

    let catalog = match cli.catalog.or(config.server.catalog_path) {
        Some(path) => Catalog::load_from(&path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => encourager_core::get_default_catalog().clone(),
    };

    let app = encourager_server::create_router(
        encourager_server::build_lookup(catalog),
        &allowed_origin,
    );

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    tracing::info!(
        "Verse service listening on {} (allowed origin: {})",
        listener.local_addr()?,
        allowed_origin
    );

    encourager_server::serve(listener, app).await?;
    Ok(())
}
