//! whitedice - Whitehack dice bot server

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use whitedice::{Config, Server};

/// Whitehack dice bot server
#[derive(Parser, Debug)]
#[command(name = "whitedice", version, about = "Run the Whitehack dice bot")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Address to listen on, overriding the configuration file
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into())
    };

    let file_layer = match &config.logging_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter()))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    init_tracing(&config)?;
    info!("Loaded configuration from {}", args.config.display());

    let server = Server::new(config).await?;
    server.run().await?;

    Ok(())
}
