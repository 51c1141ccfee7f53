//! WebSocket handler for chat connections
//!
//! Every connection joins one channel. Messages are relayed to everyone in
//! the channel, and the bot's reply to a command is posted to the channel
//! as well.

use std::collections::HashMap;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::AppState;
use crate::bot::ChatUser;

const DEFAULT_CHANNEL: &str = "general";

/// Outgoing messages queued per session
const SESSION_QUEUE: usize = 32;

/// A connected chat session
#[derive(Debug)]
pub struct ChatSession {
    pub session_id: String,
    pub user: ChatUser,
    pub channel: String,
    pub sender: mpsc::Sender<ServerMessage>,
}

/// Connection manager for all active WebSocket connections
#[derive(Default)]
pub struct ConnectionManager {
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session
    pub async fn register(&self, session: ChatSession) {
        let session_id = session.session_id.clone();
        self.sessions.write().await.insert(session_id, session);
    }

    /// Remove a session
    pub async fn unregister(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Broadcast a message to every session in a channel.
    ///
    /// Never waits on a session: one whose queue is full misses the message.
    pub async fn broadcast_channel(&self, channel: &str, msg: ServerMessage) {
        let sessions = self.sessions.read().await;
        for session in sessions.values().filter(|s| s.channel == channel) {
            match session.sender.try_send(msg.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Dropping message for {} ({}): queue full",
                        session.user.id, session.session_id
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    warn!(
                        "Failed to broadcast to {} ({})",
                        session.user.id, session.session_id
                    );
                }
            }
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Welcome message on connect
    #[serde(rename = "welcome")]
    Welcome { user: String, channel: String },
    /// A chat message posted by someone in the channel
    #[serde(rename = "message")]
    Message { user: String, content: String },
    /// The bot's reply to a command
    #[serde(rename = "reply")]
    Reply { user: String, content: String },
    /// Error message
    #[serde(rename = "error")]
    Error { message: String },
}

/// Messages sent from client to server
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Post a chat message
    #[serde(rename = "message")]
    Message { content: String },
    /// Ping to keep connection alive
    #[serde(rename = "ping")]
    Ping,
}

/// Query parameters accepted on `/ws`
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    pub user: Option<String>,
    pub channel: Option<String>,
}

/// Handle WebSocket upgrade
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, params, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(mut socket: WebSocket, params: ConnectParams, state: AppState) {
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(SESSION_QUEUE);

    let session_id = uuid::Uuid::new_v4().to_string();
    let user_id = params
        .user
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| format!("guest-{}", &session_id[..8]));
    let user = ChatUser::new(user_id.clone(), user_id);
    let channel = params
        .channel
        .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

    info!("WebSocket connected: {} ({}) in #{}", user.id, session_id, channel);

    state
        .connections
        .register(ChatSession {
            session_id: session_id.clone(),
            user: user.clone(),
            channel: channel.clone(),
            sender: tx,
        })
        .await;

    let welcome = ServerMessage::Welcome {
        user: user.id.clone(),
        channel: channel.clone(),
    };
    if let Ok(json) = serde_json::to_string(&welcome) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    // Main loop: handle incoming messages and outgoing messages
    loop {
        tokio::select! {
            Some(msg) = rx.recv() => {
                if let Ok(json) = serde_json::to_string(&msg) {
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                handle_client_message(&state, &user, &channel, client_msg).await;
                            }
                            Err(e) => {
                                let error = ServerMessage::Error {
                                    message: format!("Invalid message: {}", e),
                                };
                                if let Ok(json) = serde_json::to_string(&error) {
                                    let _ = socket.send(Message::Text(json.into())).await;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    state.connections.unregister(&session_id).await;
    info!("WebSocket disconnected: {} ({})", user.id, session_id);
}

/// Handle a message from the client
async fn handle_client_message(state: &AppState, user: &ChatUser, channel: &str, msg: ClientMessage) {
    match msg {
        ClientMessage::Message { content } => {
            state
                .connections
                .broadcast_channel(
                    channel,
                    ServerMessage::Message {
                        user: user.id.clone(),
                        content: content.clone(),
                    },
                )
                .await;

            if let Some(reply) = state.bot.handle_message(user, &content).await {
                state
                    .connections
                    .broadcast_channel(
                        channel,
                        ServerMessage::Reply {
                            user: state.bot.identity().name.clone(),
                            content: reply,
                        },
                    )
                    .await;
            }
        }
        ClientMessage::Ping => {
            // Just keep the connection alive, no response needed
        }
    }
}
