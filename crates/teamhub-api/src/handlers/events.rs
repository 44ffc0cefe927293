//! Board-event socket.
//!
//! A read-only room feed: clients join a project's event room and receive
//! the FILE_UPLOADED / FILES_BATCH_UPLOADED / FILE_DELETED broadcasts
//! emitted by the file handlers. Inbound traffic is limited to PING.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use teamhub_realtime::{ChatInbound, ConnectionHandle, RoomEvent};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /ws/projects/{id}/events — WebSocket upgrade for board events.
pub async fn events_ws(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    state.projects.require_project(project_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_events_socket(state, project_id, socket)))
}

/// Runs one board-event connection.
async fn handle_events_socket(state: AppState, project_id: i64, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::channel::<String>(state.config.realtime.channel_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(None, tx));
    let conn_id = handle.id;

    state.board_rooms.join(project_id, Arc::clone(&handle));
    info!(project_id, conn_id = %conn_id, "Event socket connected");

    let outbound_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = ws_rx.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Ok(ChatInbound::Ping) = serde_json::from_str(text.as_str()) {
                    handle.send(RoomEvent::Pong.to_json());
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(project_id, conn_id = %conn_id, error = %e, "Event socket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.board_rooms.leave(project_id, conn_id);
    info!(project_id, conn_id = %conn_id, "Event socket disconnected");
}
