//! Route definitions for the TeamHub HTTP API.
//!
//! REST routes are organized by domain and mounted under `/api`; the
//! realtime sockets live under `/ws`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(workspace_routes())
        .merge(board_routes())
        .merge(file_routes())
        .merge(chat_routes())
        .merge(post_routes())
        .merge(schedule_routes())
        .merge(health_routes());

    let ws_routes = Router::new()
        .route("/ws/projects/{id}/chat", get(handlers::chat::chat_ws))
        .route("/ws/projects/{id}/voice", get(handlers::voice::voice_ws))
        .route("/ws/projects/{id}/events", get(handlers::events::events_ws));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: signup, verify, login, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/me", patch(handlers::user::update_me))
        .route(
            "/users/me/profile-image",
            patch(handlers::user::update_profile_image),
        )
}

/// Workspace, membership, project, activity, and free-time endpoints.
fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/workspaces", post(handlers::workspace::create_workspace))
        .route("/workspaces", get(handlers::workspace::list_workspaces))
        .route(
            "/workspaces/{id}/members",
            post(handlers::workspace::add_member),
        )
        .route(
            "/workspaces/{id}/members",
            get(handlers::workspace::list_members),
        )
        .route(
            "/workspaces/{id}/projects",
            post(handlers::workspace::create_project),
        )
        .route(
            "/workspaces/{id}/projects",
            get(handlers::workspace::list_projects),
        )
        .route(
            "/workspaces/{id}/activity",
            get(handlers::workspace::workspace_activity),
        )
        .route(
            "/workspaces/{id}/free-time",
            get(handlers::workspace::workspace_free_time),
        )
}

/// Kanban board endpoints. The static `/cards/connections` and
/// `/cards/comments` segments must be declared alongside the `/cards/{id}`
/// parameter routes; Axum matches static segments first.
fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/columns", post(handlers::board::create_column))
        .route("/projects/{id}/columns", get(handlers::board::list_columns))
        .route("/columns/{id}", patch(handlers::board::update_column))
        .route("/columns/{id}", delete(handlers::board::delete_column))
        .route("/projects/{id}/board", get(handlers::board::board))
        .route("/projects/{id}/cards", post(handlers::board::create_card))
        .route("/projects/{id}/cards", get(handlers::board::list_cards))
        .route(
            "/projects/{id}/connections",
            get(handlers::board::list_connections),
        )
        .route(
            "/cards/connections",
            post(handlers::board::create_connection),
        )
        .route(
            "/cards/connections/{from}/{to}",
            delete(handlers::board::delete_connection),
        )
        .route(
            "/cards/comments/{id}",
            delete(handlers::board::delete_comment),
        )
        .route("/cards/{id}", get(handlers::board::get_card))
        .route("/cards/{id}", patch(handlers::board::update_card))
        .route("/cards/{id}", delete(handlers::board::delete_card))
        .route("/cards/{id}/comments", post(handlers::board::create_comment))
        .route("/cards/{id}/comments", get(handlers::board::list_comments))
        .route(
            "/cards/{id}/files/{file_id}",
            post(handlers::board::attach_file),
        )
        .route(
            "/cards/{id}/files/{file_id}",
            delete(handlers::board::detach_file),
        )
}

/// File upload, listing, history, download, and delete endpoints.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/files", post(handlers::file::upload_file))
        .route(
            "/projects/{id}/files/batch",
            post(handlers::file::upload_files_batch),
        )
        .route("/projects/{id}/files", get(handlers::file::list_files))
        .route("/files/{id}/history", get(handlers::file::file_history))
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
}

/// Chat history endpoint (the socket lives under /ws).
fn chat_routes() -> Router<AppState> {
    Router::new().route("/projects/{id}/chat", get(handlers::chat::chat_history))
}

/// Post board endpoints.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/posts", get(handlers::post::list_posts))
        .route("/projects/{id}/posts", post(handlers::post::create_post))
        .route(
            "/posts/comments/{id}",
            delete(handlers::post::delete_post_comment),
        )
        .route("/posts/{id}", get(handlers::post::get_post))
        .route("/posts/{id}", patch(handlers::post::update_post))
        .route("/posts/{id}", delete(handlers::post::delete_post))
        .route(
            "/posts/{id}/comments",
            post(handlers::post::create_post_comment),
        )
        .route(
            "/posts/{id}/comments",
            get(handlers::post::list_post_comments),
        )
}

/// Schedule endpoints.
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedules", post(handlers::schedule::create_schedule))
        .route("/schedules", get(handlers::schedule::list_schedules))
        .route(
            "/schedules/{id}",
            delete(handlers::schedule::delete_schedule),
        )
}

/// Health probe.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
