//! whitedice - Whitehack dice bot server
//!
//! Players post commands like `!roll 1d20+2` or `!roll str+1 <=13` in a
//! chat channel; the bot rolls and replies with the result.

pub mod api;
pub mod bot;
pub mod command;
pub mod config;
pub mod db;
pub mod error;
pub mod roll;
pub mod stats;

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use bot::{Bot, ChatUser};
pub use config::Config;
use db::Database;

/// The whitedice server instance
pub struct Server {
    config: Config,
    db: Arc<Database>,
    bot: Arc<Bot>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: Config) -> Result<Self> {
        let db = Database::new(config.database_path.as_deref()).await?;
        let identity = ChatUser::new(format!("bot:{}", config.bot_name), config.bot_name.clone());
        let bot = Bot::new(identity, &db);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            db: Arc::new(db),
            bot: Arc::new(bot),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Get the database handle
    pub fn db(&self) -> Arc<Database> {
        self.db.clone()
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("{} listening on {}", self.config.bot_name, local_addr);

        let router = api::router(self.db.clone(), self.bot.clone());
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("{} shutdown complete", self.config.bot_name);
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
