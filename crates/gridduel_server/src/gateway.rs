//! # WebSocket Gateway
//!
//! Thin transport in front of the actor. One task pair per socket:
//!
//! ```text
//! socket ──▶ reader ──(Action)──▶ actor queue
//! socket ◀── writer ◀──(bounded mpsc)── ChannelSink ◀── actor
//! ```
//!
//! The reader decodes JSON text frames and forwards them; malformed frames
//! are logged and dropped. The writer serializes whatever the actor queued.
//! When either side ends, the gateway enqueues the connection's leave.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify};

use gridduel_shared::{ClientMessage, ServerMessage};

use crate::error::SinkError;
use crate::server::{Action, ActionSender, ConnectionId};
use crate::traits::ClientSink;

/// Outbound path of one socket: a bounded queue plus a close signal.
pub struct ChannelSink {
    tx: mpsc::Sender<ServerMessage>,
    closer: Arc<Notify>,
}

impl ChannelSink {
    /// Creates a sink and the receiving half for the writer task.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ServerMessage>, Arc<Notify>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let closer = Arc::new(Notify::new());
        let sink = Self {
            tx,
            closer: Arc::clone(&closer),
        };
        (sink, rx, closer)
    }
}

impl ClientSink for ChannelSink {
    fn deliver(&self, message: &ServerMessage) -> Result<(), SinkError> {
        self.tx.try_send(message.clone()).map_err(|err| match err {
            TrySendError::Full(_) => SinkError::Full,
            TrySendError::Closed(_) => SinkError::Closed,
        })
    }

    fn close(&self) {
        self.closer.notify_one();
    }
}

#[derive(Clone)]
struct GatewayState {
    actions: ActionSender,
    outbound_buffer: usize,
}

/// Builds the HTTP router: `/ws` for players, `/healthz` for probes.
pub fn router(actions: ActionSender, outbound_buffer: usize) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(healthz))
        .with_state(GatewayState {
            actions,
            outbound_buffer,
        })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn write_frame(
    ws_sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => ws_sender.send(Message::Text(json.into())).await,
        Err(err) => {
            tracing::error!("Failed to encode outbound message: {}", err);
            Ok(())
        }
    }
}

async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (sink, mut rx, closer) = ChannelSink::new(state.outbound_buffer);

    let Some(id) = state.actions.connect(Box::new(sink)) else {
        tracing::warn!("Game actor is gone, refusing connection");
        return;
    };
    tracing::debug!("WebSocket open: {}", id);

    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                next = rx.recv() => {
                    let Some(message) = next else { break };
                    if write_frame(&mut ws_sender, &message).await.is_err() {
                        return;
                    }
                }
                () = closer.notified() => {
                    // Flush what the actor queued before it closed us.
                    rx.close();
                    while let Some(message) = rx.recv().await {
                        if write_frame(&mut ws_sender, &message).await.is_err() {
                            return;
                        }
                    }
                    break;
                }
            }
        }
        if let Err(err) = ws_sender.send(Message::Close(None)).await {
            tracing::debug!("Close frame not sent: {}", err);
        }
    });

    let actions = state.actions.clone();
    let mut recv_task = tokio::spawn(async move { read_frames(id, &mut ws_receiver, &actions).await });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.actions.send(Action::Leave { id });
    tracing::debug!("WebSocket closed: {}", id);
}

async fn read_frames(id: ConnectionId, ws_receiver: &mut SplitStream<WebSocket>, actions: &ActionSender) {
    while let Some(frame) = ws_receiver.next().await {
        let message = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!("WebSocket error for {}: {}", id, err);
                break;
            }
        };
        match serde_json::from_str::<ClientMessage>(message.as_str()) {
            Ok(parsed) => {
                if !actions.send(Action::from_client(id, parsed)) {
                    break;
                }
            }
            Err(err) => tracing::debug!("Ignoring malformed frame from {}: {}", id, err),
        }
    }
}
