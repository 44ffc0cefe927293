//! Voice-signaling socket.
//!
//! The server relays WebRTC signaling (offers, answers, ICE candidates)
//! between room members without interpreting it: any JSON frame received
//! on a voice room is rebroadcast verbatim to the other members.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use teamhub_realtime::{ConnectionHandle, RoomEvent};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /ws/projects/{id}/voice — WebSocket upgrade for voice signaling.
pub async fn voice_ws(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    state.projects.require_project(project_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_voice_socket(state, project_id, socket)))
}

/// Runs one voice connection.
async fn handle_voice_socket(state: AppState, project_id: i64, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::channel::<String>(state.config.realtime.channel_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(None, tx));
    let conn_id = handle.id;

    state.voice_rooms.join(project_id, Arc::clone(&handle));
    info!(project_id, conn_id = %conn_id, "Voice socket connected");

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
                // Signaling payloads are opaque; require well-formed JSON
                // and pass everything else through untouched.
                if serde_json::from_str::<serde_json::Value>(text.as_str()).is_err() {
                    warn!(project_id, conn_id = %conn_id, "Dropping non-JSON voice frame");
                    continue;
                }
                state
                    .voice_rooms
                    .broadcast(project_id, text.as_str(), Some(conn_id));
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(project_id, conn_id = %conn_id, error = %e, "Voice socket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.voice_rooms.leave(project_id, conn_id);

    // Tell the remaining peers so they can tear down their peer
    // connections for this participant.
    state
        .voice_rooms
        .broadcast(project_id, &RoomEvent::UserLeft.to_json(), None);

    info!(project_id, conn_id = %conn_id, "Voice socket disconnected");
}
