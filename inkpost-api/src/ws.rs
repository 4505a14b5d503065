/// Websocket board
///
/// A small broadcast board: every text frame a client sends is fanned out
/// to all connected clients. Connections are tracked in an explicitly
/// owned [`ClientRegistry`] living in the application state; each
/// connection registers on upgrade and is removed when its socket closes,
/// so the registry never grows past the set of live connections.
///
/// Demo semantics, as in the CRUD endpoints around it: no persistence, no
/// backpressure, no ordering or delivery guarantees.

use std::collections::HashMap;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;

/// Registry of connected board clients
///
/// Each client holds the receiving end of an unbounded channel; the
/// registry holds the senders and fans broadcasts out over them. Senders
/// whose receiver is gone are pruned on the next broadcast.
#[derive(Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<Uuid, mpsc::UnboundedSender<Message>>>,
}

impl ClientRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client and returns its connection id
    pub async fn add(&self, tx: mpsc::UnboundedSender<Message>) -> Uuid {
        let id = Uuid::new_v4();
        self.clients.write().await.insert(id, tx);
        debug!(conn_id = %id, "board client connected");
        id
    }

    /// Removes a client (called on disconnect)
    pub async fn remove(&self, id: Uuid) {
        self.clients.write().await.remove(&id);
        debug!(conn_id = %id, "board client disconnected");
    }

    /// Number of currently registered clients
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// True when no clients are registered
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }

    /// Fans a text frame out to every live client
    ///
    /// Clients whose channel has closed are dropped from the registry.
    pub async fn broadcast(&self, text: String) {
        let mut clients = self.clients.write().await;
        clients.retain(|id, tx| {
            if tx.send(Message::Text(text.clone())).is_err() {
                debug!(conn_id = %id, "pruning closed board client");
                false
            } else {
                true
            }
        });
    }
}

/// Websocket upgrade handler for `GET /ws`
pub async fn board_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let registry = state.board.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Per-connection loop
///
/// A writer task forwards registry broadcasts to the socket sink while
/// this task reads inbound frames and rebroadcasts text. Either half
/// ending tears the connection down and removes it from the registry.
async fn handle_socket(socket: WebSocket, registry: std::sync::Arc<ClientRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let conn_id = registry.add(tx).await;

    let mut writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => registry.broadcast(text).await,
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Ping/pong handled by axum, binary frames ignored
                    Some(Ok(_)) => {}
                }
            }
            _ = &mut writer => break,
        }
    }

    registry.remove(conn_id).await;
    writer.abort();
}
