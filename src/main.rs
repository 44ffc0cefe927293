//! TeamHub server — team collaboration backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use teamhub_core::config::AppConfig;
use teamhub_core::error::AppError;
use teamhub_core::traits::storage::BlobStore;
use teamhub_realtime::RoomRegistry;

#[tokio::main]
async fn main() {
    let env = std::env::var("TEAMHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TeamHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = teamhub_database::connection::create_pool(&config.database).await?;
    teamhub_database::migration::run_migrations(&db_pool).await?;

    // ── Blob stores ──────────────────────────────────────────────
    let upload_store: Arc<dyn BlobStore> = Arc::new(
        teamhub_storage::LocalBlobStore::new(&config.storage.upload_root).await?,
    );
    let image_store: Arc<dyn BlobStore> = Arc::new(
        teamhub_storage::LocalBlobStore::new(&config.storage.image_root).await?,
    );

    // ── Repositories ─────────────────────────────────────────────
    use teamhub_database::repositories;
    let user_repo = Arc::new(repositories::user::UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(repositories::session::SessionRepository::new(db_pool.clone()));
    let workspace_repo = Arc::new(repositories::workspace::WorkspaceRepository::new(
        db_pool.clone(),
    ));
    let project_repo = Arc::new(repositories::project::ProjectRepository::new(db_pool.clone()));
    let board_repo = Arc::new(repositories::board::BoardRepository::new(db_pool.clone()));
    let file_repo = Arc::new(repositories::file::FileRepository::new(db_pool.clone()));
    let chat_repo = Arc::new(repositories::chat::ChatRepository::new(db_pool.clone()));
    let post_repo = Arc::new(repositories::post::PostRepository::new(db_pool.clone()));
    let schedule_repo = Arc::new(repositories::schedule::ScheduleRepository::new(
        db_pool.clone(),
    ));
    let activity_repo = Arc::new(repositories::activity::ActivityRepository::new(
        db_pool.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let mailer = Arc::new(teamhub_service::Mailer::new(config.mail.clone())?);

    let activity = teamhub_service::ActivityService::new(activity_repo);
    let auth = teamhub_service::AuthService::new(
        Arc::clone(&user_repo),
        session_repo,
        mailer,
        config.session.clone(),
        config.mail.clone(),
    );
    let users = teamhub_service::UserService::new(Arc::clone(&user_repo), image_store);
    let workspaces = teamhub_service::WorkspaceService::new(
        workspace_repo,
        Arc::clone(&user_repo),
        activity.clone(),
    );
    let projects = teamhub_service::ProjectService::new(project_repo, workspaces.clone());
    let files = teamhub_service::FileService::new(
        Arc::clone(&file_repo),
        projects.clone(),
        upload_store,
        activity.clone(),
        config.storage.max_upload_size_bytes,
    );
    let board = teamhub_service::BoardService::new(
        board_repo,
        Arc::clone(&user_repo),
        projects.clone(),
        files.clone(),
        activity.clone(),
    );
    let chat = teamhub_service::ChatService::new(
        chat_repo,
        Arc::clone(&user_repo),
        projects.clone(),
        config.realtime.max_message_length,
    );
    let posts = teamhub_service::PostService::new(post_repo, projects.clone());
    let schedules = teamhub_service::ScheduleService::new(
        schedule_repo,
        workspaces.clone(),
        activity.clone(),
    );

    // ── Room registries ──────────────────────────────────────────
    let chat_rooms = Arc::new(RoomRegistry::new());
    let voice_rooms = Arc::new(RoomRegistry::new());
    let board_rooms = Arc::new(RoomRegistry::new());

    // ── Expired-session sweeper ──────────────────────────────────
    let sweep_auth = auth.clone();
    let sweep_interval = config.session.sweep_interval_seconds;
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(sweep_interval.max(1)));
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_auth.sweep_expired_sessions().await {
                tracing::warn!(error = %e, "Session sweep failed");
            }
        }
    });

    // ── HTTP server ──────────────────────────────────────────────
    let state = teamhub_api::AppState {
        config: Arc::new(config.clone()),
        chat_rooms: Arc::clone(&chat_rooms),
        voice_rooms: Arc::clone(&voice_rooms),
        board_rooms: Arc::clone(&board_rooms),
        auth,
        users,
        workspaces,
        projects,
        board,
        files,
        chat,
        posts,
        schedules,
        activity,
    };

    let app = teamhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TeamHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // Tear down realtime state so peers see clean closes.
    chat_rooms.close_all();
    voice_rooms.close_all();
    board_rooms.close_all();

    db_pool.close().await;

    tracing::info!("TeamHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
