//! Chat handlers — room history and the realtime chat socket.

use std::sync::Arc;

use axum::Json;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use teamhub_realtime::{ChatInbound, ConnectionHandle, RoomEvent};

use crate::dto::request::ChatHistoryQuery;
use crate::dto::response::ChatMessageResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/projects/{id}/chat — message history, ascending.
pub async fn chat_history(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
    Query(query): Query<ChatHistoryQuery>,
) -> Result<Json<Vec<ChatMessageResponse>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(state.config.realtime.default_history_limit);
    let messages = state.chat.history(project_id, limit, query.after_id).await?;
    Ok(Json(
        messages.into_iter().map(ChatMessageResponse::from).collect(),
    ))
}

/// GET /ws/projects/{id}/chat — WebSocket upgrade for the chat room.
pub async fn chat_ws(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    // Reject unknown rooms before the upgrade completes.
    state.projects.require_project(project_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_chat_socket(state, project_id, socket)))
}

/// Runs one chat connection: register, pump frames, clean up.
async fn handle_chat_socket(state: AppState, project_id: i64, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::channel::<String>(state.config.realtime.channel_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(None, tx));
    let conn_id = handle.id;

    state.chat_rooms.join(project_id, Arc::clone(&handle));
    info!(project_id, conn_id = %conn_id, "Chat socket connected");

    // Forward queued outbound frames to the peer.
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
                let inbound: ChatInbound = match serde_json::from_str(text.as_str()) {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!(project_id, conn_id = %conn_id, error = %e, "Unparseable chat frame");
                        continue;
                    }
                };

                match inbound {
                    ChatInbound::MessageSent { content, user_id } => {
                        let (Some(content), Some(user_id)) = (content, user_id) else {
                            continue;
                        };
                        if content.trim().is_empty() {
                            continue;
                        }

                        match state.chat.persist(project_id, user_id, &content).await {
                            Ok(stored) => {
                                let view = ChatMessageResponse::from(stored);
                                let Ok(data) = serde_json::to_value(&view) else {
                                    continue;
                                };
                                let payload = RoomEvent::MessageSent { data }.to_json();

                                // Echo to the sender for id confirmation,
                                // then fan out to the rest of the room.
                                handle.send(payload.clone());
                                state
                                    .chat_rooms
                                    .broadcast(project_id, &payload, Some(conn_id));
                            }
                            Err(e) => {
                                warn!(project_id, user_id, error = %e, "Chat persist failed");
                            }
                        }
                    }
                    ChatInbound::Ping => {
                        handle.send(RoomEvent::Pong.to_json());
                    }
                    ChatInbound::Pong => {}
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(project_id, conn_id = %conn_id, error = %e, "Chat socket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.chat_rooms.leave(project_id, conn_id);
    info!(project_id, conn_id = %conn_id, "Chat socket disconnected");
}
