//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use notebase_auth::jwt::decoder::JwtDecoder;
use notebase_auth::jwt::encoder::JwtEncoder;
use notebase_auth::password::PasswordHasher;
use notebase_core::config::AppConfig;

use notebase_database::repositories::folder::FolderRepository;
use notebase_database::repositories::note::NoteRepository;
use notebase_database::repositories::tag::TagRepository;
use notebase_database::repositories::user::UserRepository;

use notebase_service::account::AccountService;
use notebase_service::folder::FolderService;
use notebase_service::note::NoteService;
use notebase_service::tag::TagService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Folder repository
    pub folder_repo: Arc<FolderRepository>,
    /// Tag repository
    pub tag_repo: Arc<TagRepository>,
    /// Note repository
    pub note_repo: Arc<NoteRepository>,

    /// Account service
    pub account_service: Arc<AccountService>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// Tag service
    pub tag_service: Arc<TagService>,
    /// Note service
    pub note_service: Arc<NoteService>,
}
