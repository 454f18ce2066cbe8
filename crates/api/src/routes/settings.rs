//! Site settings endpoint handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::setting::validate_setting;
use domain::models::{Setting, SettingKey};
use persistence::repositories::SettingRepository;
use serde_json::Value;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

fn known_key(key: &str) -> Result<SettingKey, ApiError> {
    SettingKey::parse(key).ok_or_else(|| ApiError::NotFound(format!("Unknown setting '{}'", key)))
}

/// All stored settings as a `key -> value` object.
///
/// GET /api/v1/settings
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Value>>, ApiError> {
    let settings = SettingRepository::new(state.pool.clone()).list().await?;
    Ok(Json(
        settings
            .into_iter()
            .map(|s| (s.key.to_string(), s.value))
            .collect(),
    ))
}

/// GET /api/v1/settings/:key
pub async fn get_public(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = known_key(&key)?;
    SettingRepository::new(state.pool.clone())
        .find(key)
        .await?
        .map(|s| Json(s.value))
        .ok_or_else(|| ApiError::NotFound(format!("Setting '{}' has not been set", key)))
}

/// Stored settings with timestamps.
///
/// GET /api/v1/admin/settings
pub async fn list_admin(State(state): State<AppState>) -> Result<Json<Vec<Setting>>, ApiError> {
    Ok(Json(SettingRepository::new(state.pool.clone()).list().await?))
}

/// Replace one setting. The body is the full value for the key.
///
/// PUT /api/v1/admin/settings/:key
pub async fn upsert(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Setting>, ApiError> {
    let (key, value) = validate_setting(&key, value)?;
    let setting = SettingRepository::new(state.pool.clone())
        .upsert(key, value)
        .await?;

    info!(key = %key, "Setting saved");
    Ok(Json(setting))
}
