//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::messages::ServerMessage;
use crate::api::AppState;
use crate::board::Board;

/// WebSocket upgrade handler; entry point for view connections.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let board = Arc::clone(&state.board);
    ws.on_upgrade(move |socket| handle_socket(socket, board))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, board: Arc<Board>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before snapshotting so no event between the two is lost;
    // an event that races the snapshot is just re-applied by the client.
    let mut events = board.subscribe();
    let snapshot = board.snapshot().await;

    if send_message(&mut sender, &ServerMessage::Snapshot { snapshot })
        .await
        .is_err()
    {
        return;
    }

    // Forward board events until either side drops
    let mut send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if send_message(&mut sender, &ServerMessage::from(event))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "connection lagged, resyncing with a snapshot");
                    let snapshot = board.snapshot().await;
                    if send_message(&mut sender, &ServerMessage::Snapshot { snapshot })
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain the client side; close is the only message we act on
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    tracing::debug!("client requested close");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "websocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize message");
            Ok(())
        }
    }
}
