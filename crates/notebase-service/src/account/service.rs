//! Account lifecycle — register, login, token refresh, profile.

use std::sync::Arc;

use tracing::info;

use notebase_auth::jwt::decoder::JwtDecoder;
use notebase_auth::jwt::encoder::{JwtEncoder, TokenPair};
use notebase_auth::password::PasswordHasher;
use notebase_core::config::auth::AuthConfig;
use notebase_core::error::AppError;
use notebase_database::repositories::user::UserRepository;
use notebase_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Longest accepted username.
const USERNAME_MAX_LENGTH: usize = 100;

/// Handles account creation and credential-based token issuing.
///
/// User identity is immutable once created: there is no update or delete
/// operation.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder (for refresh).
    decoder: Arc<JwtDecoder>,
    /// Auth configuration (password policy).
    config: AuthConfig,
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The authenticated user record.
    pub user: User,
    /// Freshly issued token pair.
    pub tokens: TokenPair,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
            config,
        }
    }

    /// Registers a new user.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("username is required"));
        }
        if username.trim() != username {
            return Err(AppError::validation(
                "username must not contain leading or trailing whitespace",
            ));
        }
        if username.len() > USERNAME_MAX_LENGTH {
            return Err(AppError::validation("username is too long"));
        }
        if password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown username and wrong password report the same message.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedUser { user, tokens })
    }

    /// Issues a fresh token pair from a still-valid refresh token, without
    /// re-submission of credentials.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        Ok(AuthenticatedUser { user, tokens })
    }

    /// Fetches the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
