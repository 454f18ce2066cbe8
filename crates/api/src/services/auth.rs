//! Admin authentication: credential checks and token issuance.

use std::sync::Arc;

use chrono::Utc;
use domain::models::{AdminProfile, AdminUser};
use persistence::repositories::AdminUserRepository;
use shared::jwt::{IssuedToken, JwtConfig, JwtError};
use shared::password::{verify_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::middleware::metrics::record_login_attempt;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Deliberately indistinguishable to the caller.
            AuthError::InvalidCredentials | AuthError::AccountDisabled => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Database(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub admin: AdminProfile,
    pub token: IssuedToken,
}

/// Authenticates administrators against the `admin_users` table.
#[derive(Clone)]
pub struct AuthService {
    admins: AdminUserRepository,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
            jwt,
        }
    }

    /// Verifies credentials and issues an admin access token.
    ///
    /// Updates `last_login_at` on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let result = self.try_login(email, password).await;
        record_login_attempt(result.is_ok());
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let admin: AdminUser = self
            .admins
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?
            .into();

        if !verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !admin.is_active {
            warn!(admin_id = %admin.id, "Login attempt for disabled admin");
            return Err(AuthError::AccountDisabled);
        }

        let token = self.jwt.issue_admin_token(admin.id)?;

        let now = Utc::now();
        self.admins.record_login(admin.id, now).await?;
        info!(admin_id = %admin.id, jti = %token.jti, "Admin logged in");

        let mut profile = AdminProfile::from(admin);
        profile.last_login_at = Some(now);

        Ok(LoginResult {
            admin: profile,
            token,
        })
    }
}
