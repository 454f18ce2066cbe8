//! Admin session middleware.
//!
//! Admin routes carry a bearer JWT. The session is derived from the token
//! on every request and placed in request extensions; nothing is cached
//! between requests.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use shared::jwt::{extract_admin_id, JwtConfig, JwtError};
use uuid::Uuid;

use crate::app::AppState;

/// The authenticated administrator of the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub admin_id: Uuid,
    /// JWT ID, for log correlation.
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Validates an admin token and builds the session it represents.
    pub fn from_token(jwt: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt.validate_admin_token(token)?;
        let admin_id = extract_admin_id(&claims)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(JwtError::InvalidToken)?;

        Ok(Self {
            admin_id,
            jti: claims.jti,
            expires_at,
        })
    }
}

/// Returns the token of a `Bearer` Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires a valid admin session.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    match AdminSession::from_token(&state.jwt, token) {
        Ok(session) => {
            tracing::debug!(admin_id = %session.admin_id, jti = %session.jti, "Admin session");
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("Admin token rejected: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers_with("Basic abc")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_from_valid_token() {
        let jwt = JwtConfig::from_secret("session-test-secret", 600);
        let admin_id = Uuid::new_v4();
        let issued = jwt.issue_admin_token(admin_id).unwrap();

        let session = AdminSession::from_token(&jwt, &issued.token).unwrap();
        assert_eq!(session.admin_id, admin_id);
        assert_eq!(session.jti, issued.jti);
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_session_rejects_foreign_token() {
        let issuer = JwtConfig::from_secret("one-secret", 600);
        let verifier = JwtConfig::from_secret("another-secret", 600);
        let issued = issuer.issue_admin_token(Uuid::new_v4()).unwrap();

        assert!(AdminSession::from_token(&verifier, &issued.token).is_err());
    }

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized_response("nope");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}
