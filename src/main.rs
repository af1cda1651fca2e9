mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "rsvp-server")]
#[command(about = "Serve party lookup and RSVP submission for a guest-list spreadsheet")]
struct Cli {
    /// Config file (defaults to ~/.config/rsvp/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configured one
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = AppState::from_config(&config)?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    log::info!("rsvp-server listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
