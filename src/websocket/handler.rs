use std::sync::Arc;

use axum::{
    extract::{Path, State, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::state::AppState;
use crate::utils::ScopeGuard;
use crate::websocket::session::ClientSession;

/// WebSocket handler
pub async fn websocket_handler(
    Path(room_id): Path<String>,
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    info!(room=%room_id, "New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, room_id, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, room_id: String, app_state: Arc<AppState>) {
    // Everything addressed to this client goes through one channel, drained by the writer task
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Join the room; hello and the snapshot are queued before anyone else can broadcast to us
    let (room, client_id) = app_state.registry.admit(&room_id, tx.clone());
    info!(room=%room_id, client_id=%client_id, "WebSocket connection established");

    let session = ClientSession::new(room_id, client_id, room, tx);
    // Leave the room however this task ends, including when it is dropped mid-await
    let guard_session = session.clone();
    let _cleanup = ScopeGuard::new(move || {
        guard_session.disconnect();
    });

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Forward queued messages to the socket. Ends when the socket refuses a
    // frame, which closes the channel and marks this member dead for broadcasts.
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                debug!("socket send failed; writer task exiting");
                break;
            }
        }
    });

    // Listen for incoming messages until the client closes or the stream fails
    let reader = session.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => reader.handle_text(&text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
    info!(room=%session.room_id(), client_id=%session.client_id(), "WebSocket connection terminated");
}
