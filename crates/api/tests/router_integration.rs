//! Router-level tests that never reach the database.
//!
//! The app runs on a lazy pool, so every request here must be answered by
//! middleware or by validation that happens before a query.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{
    authed_request, create_test_app, json_request, lazy_pool, parse_response_body, test_config,
    TEST_PRIVATE_KEY, TEST_PUBLIC_KEY,
};
use serde_json::json;
use shared::jwt::JwtConfig;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    create_test_app(test_config(&[]), lazy_pool())
}

fn admin_token(admin_id: Uuid) -> String {
    JwtConfig::with_leeway(TEST_PRIVATE_KEY, TEST_PUBLIC_KEY, 3600, 30)
        .unwrap()
        .issue_admin_token(admin_id)
        .unwrap()
        .token
}

#[tokio::test]
async fn test_liveness() {
    let response = app()
        .oneshot(Request::get("/api/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let response = app()
        .oneshot(
            Request::get("/api/health/live")
                .header("x-request-id", "church-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-request-id").unwrap(), "church-42");
    assert!(headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_hsts_when_enabled() {
    let app = create_test_app(test_config(&[("security.hsts_enabled", "true")]), lazy_pool());
    let response = app
        .oneshot(Request::get("/api/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("strict-transport-security"));
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    for uri in [
        "/api/v1/admin/events",
        "/api/v1/admin/sermons",
        "/api/v1/admin/prayer-requests",
        "/api/v1/admin/settings",
    ] {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let forged = JwtConfig::from_secret("not-the-server-key", 3600)
        .issue_admin_token(Uuid::new_v4())
        .unwrap()
        .token;

    let response = app()
        .oneshot(authed_request(Method::GET, "/api/v1/auth/session", &forged, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_from_token() {
    let admin_id = Uuid::new_v4();
    let response = app()
        .oneshot(authed_request(
            Method::GET,
            "/api/v1/auth/session",
            &admin_token(admin_id),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["adminId"], admin_id.to_string());
}

#[tokio::test]
async fn test_unknown_order_column_is_rejected() {
    let response = app()
        .oneshot(authed_request(
            Method::GET,
            "/api/v1/admin/events?order=password",
            &admin_token(Uuid::new_v4()),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("allowed"));
}

#[tokio::test]
async fn test_unknown_flag_is_rejected() {
    let uri = format!("/api/v1/admin/contact-messages/{}/flags/featured", Uuid::new_v4());
    let response = app()
        .oneshot(authed_request(
            Method::PUT,
            &uri,
            &admin_token(Uuid::new_v4()),
            Some(json!({ "value": true })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_before_storage() {
    let response = app()
        .oneshot(authed_request(
            Method::POST,
            "/api/v1/admin/testimonials",
            &admin_token(Uuid::new_v4()),
            Some(json!({ "name": "", "content": "Great", "rating": 9 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "rating"]);
}

#[tokio::test]
async fn test_sermon_lookup_without_metadata_service() {
    let response = app()
        .oneshot(authed_request(
            Method::POST,
            "/api/v1/admin/sermons/lookup",
            &admin_token(Uuid::new_v4()),
            Some(json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["videoId"], "dQw4w9WgXcQ");
    assert_eq!(body["embedUrl"], "https://www.youtube.com/embed/dQw4w9WgXcQ");
    assert!(body.get("title").map_or(true, |t| t.is_null()));
}

#[tokio::test]
async fn test_sermon_lookup_rejects_other_links() {
    let response = app()
        .oneshot(authed_request(
            Method::POST,
            "/api/v1/admin/sermons/lookup",
            &admin_token(Uuid::new_v4()),
            Some(json!({ "url": "https://example.com/video" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_submission_is_rejected() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/contact-messages",
            json!({ "name": "Abena", "email": "abena@example.com", "message": "  " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_validates_email_format() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "email": "admin", "password": "secret" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_private_resources_have_no_public_listing() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/prayer-requests")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
