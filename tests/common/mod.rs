//! Common test utilities - WhiteDiceTest harness for end-to-end testing

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use whitedice::{Config, Server};

/// Test harness that spawns a real whitedice server on a random port
pub struct WhiteDiceTest {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl WhiteDiceTest {
    /// Start a new test server instance
    pub async fn start() -> Result<Self> {
        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let config = Config {
            bind_addr: addr,
            database_path: None, // In-memory for tests
            logging_path: None,
            ..Config::default()
        };

        let server = Arc::new(Server::new(config).await?);
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
        })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("http://{}{}", self.addr, path))
            .send()
            .await?)
    }

    /// Direct access to the database for test setup/assertions
    pub fn db(&self) -> Arc<whitedice::db::Database> {
        self.server.db()
    }

    /// Connect to the chat WebSocket as `user` in `channel`
    pub async fn connect(&self, user: &str, channel: &str) -> Result<WsClient> {
        let url = format!("ws://{}/ws?user={}&channel={}", self.addr, user, channel);
        let (ws_stream, _) = connect_async(&url).await?;
        let (write, read) = ws_stream.split();
        Ok(WsClient { write, read })
    }

    /// Connect without naming a user
    pub async fn connect_anonymous(&self) -> Result<WsClient> {
        let (ws_stream, _) = connect_async(&format!("ws://{}/ws", self.addr)).await?;
        let (write, read) = ws_stream.split();
        Ok(WsClient { write, read })
    }
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// WebSocket client for testing
pub struct WsClient {
    write: futures_util::stream::SplitSink<WsStream, Message>,
    read: futures_util::stream::SplitStream<WsStream>,
}

impl WsClient {
    /// Post a chat message
    pub async fn say(&mut self, content: &str) -> Result<()> {
        let msg = serde_json::json!({
            "type": "message",
            "content": content
        });
        self.write
            .send(Message::Text(msg.to_string().into()))
            .await?;
        Ok(())
    }

    /// Send raw text, bypassing the JSON envelope
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.write.send(Message::Text(text.to_string().into())).await?;
        Ok(())
    }

    /// Receive the next message as JSON
    pub async fn recv_json(&mut self) -> Result<serde_json::Value> {
        loop {
            match self.read.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(serde_json::from_str(&text)?);
                }
                Some(Ok(Message::Close(_))) | None => {
                    anyhow::bail!("WebSocket closed");
                }
                _ => continue, // Skip binary/ping/pong frames
            }
        }
    }

    /// Receive with timeout
    pub async fn recv_json_timeout(&mut self, timeout: Duration) -> Result<serde_json::Value> {
        match tokio::time::timeout(timeout, self.recv_json()).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("Timeout waiting for WebSocket message"),
        }
    }

    /// Skip messages until one of `kind` arrives
    pub async fn recv_kind(&mut self, kind: &str) -> Result<serde_json::Value> {
        loop {
            let msg = self.recv_json_timeout(Duration::from_secs(2)).await?;
            if msg["type"] == kind {
                return Ok(msg);
            }
        }
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<()> {
        self.write.close().await?;
        Ok(())
    }
}

impl Drop for WhiteDiceTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
