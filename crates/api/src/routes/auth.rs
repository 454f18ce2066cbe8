//! Admin authentication endpoints.

use axum::{extract::State, Json};
use domain::models::AdminProfile;
use serde::{Deserialize, Serialize};
use shared::validation::validate_required;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::services::AuthService;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub admin: AdminProfile,
}

/// Sign in as an administrator.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let result = AuthService::new(state.pool.clone(), state.jwt.clone())
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: result.token.token,
        token_type: "Bearer",
        expires_in: result.token.expires_in,
        admin: result.admin,
    }))
}

/// The session represented by the bearer token.
///
/// GET /api/v1/auth/session
pub async fn session(session: AdminSession) -> Json<AdminSession> {
    Json(session)
}
