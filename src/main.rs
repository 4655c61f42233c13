//! Notebase Server — personal note-taking backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use notebase_core::config::AppConfig;
use notebase_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTEBASE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Notebase v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = notebase_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    notebase_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(notebase_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let folder_repo = Arc::new(
        notebase_database::repositories::folder::FolderRepository::new(db_pool.clone()),
    );
    let tag_repo = Arc::new(notebase_database::repositories::tag::TagRepository::new(
        db_pool.clone(),
    ));
    let note_repo = Arc::new(notebase_database::repositories::note::NoteRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(notebase_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(notebase_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(notebase_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: Initialize services ──────────────────────────────
    let account_service = Arc::new(notebase_service::account::AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        config.auth.clone(),
    ));
    let folder_service = Arc::new(notebase_service::folder::FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&note_repo),
    ));
    let tag_service = Arc::new(notebase_service::tag::TagService::new(
        Arc::clone(&tag_repo),
        Arc::clone(&note_repo),
    ));
    let note_service = Arc::new(notebase_service::note::NoteService::new(
        Arc::clone(&note_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&tag_repo),
    ));

    // ── Step 5: Build state and router ───────────────────────────
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let state = notebase_api::AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        folder_repo,
        tag_repo,
        note_repo,
        account_service,
        folder_service,
        tag_service,
        note_service,
    };

    let app = notebase_api::build_router(state);

    // ── Step 6: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    tracing::info!("Notebase listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}
