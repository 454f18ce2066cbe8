//! Generic CRUD handlers shared by every content resource.
//!
//! Each handler is instantiated per resource type, e.g.
//! `list_public::<Event>`. Ordering and flag names are resolved against the
//! resource whitelists before any SQL is built.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use domain::resource::{parse_flag, prepare_and_validate, OrderBy, ResourceStore, Scope};
use domain::Resource;
use persistence::{PgStore, Table};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// `?order=<column>&ascending=<bool>`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub order: Option<String>,
    pub ascending: Option<bool>,
}

impl OrderQuery {
    pub fn resolve<R: Table>(&self) -> Result<OrderBy, ApiError> {
        Ok(OrderBy::parse::<R>(self.order.as_deref(), self.ascending)?)
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Body of a flag toggle.
#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub value: bool,
}

pub(crate) fn store<R: Table>(state: &AppState) -> PgStore<R> {
    PgStore::new(state.pool.clone())
}

/// Validates and inserts a draft.
pub(crate) async fn insert_draft<R: Table>(
    state: &AppState,
    draft: R::Draft,
) -> Result<R, ApiError> {
    let draft = prepare_and_validate::<R>(draft, None)?;
    let record = store::<R>(state).insert(draft).await?;

    info!(resource = R::NAME, id = %record.id(), "{} created", R::LABEL);
    Ok(record)
}

/// Validates a draft against the stored record and replaces it.
pub(crate) async fn replace_draft<R: Table>(
    state: &AppState,
    id: Uuid,
    draft: R::Draft,
) -> Result<R, ApiError> {
    let store = store::<R>(state);
    let existing = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::LABEL)))?;

    let draft = prepare_and_validate::<R>(draft, Some(&existing))?;
    let record = store.update(id, draft).await?;

    info!(resource = R::NAME, id = %id, "{} updated", R::LABEL);
    Ok(record)
}

/// Rows visible on the public site.
///
/// GET /api/v1/{resource}
pub async fn list_public<R: Table>(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<ListResponse<R>>, ApiError> {
    let order = query.resolve::<R>()?;
    let items = store::<R>(&state).list(Scope::Public, order).await?;
    Ok(Json(items.into()))
}

/// GET /api/v1/admin/{resource}
pub async fn list<R: Table>(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<ListResponse<R>>, ApiError> {
    let order = query.resolve::<R>()?;
    let items = store::<R>(&state).list(Scope::All, order).await?;
    Ok(Json(items.into()))
}

/// GET /api/v1/admin/{resource}/:id
pub async fn get_one<R: Table>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<R>, ApiError> {
    store::<R>(&state)
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::LABEL)))
}

/// POST /api/v1/admin/{resource}
pub async fn create<R: Table>(
    State(state): State<AppState>,
    Json(draft): Json<R::Draft>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let record = insert_draft::<R>(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/v1/admin/{resource}/:id
pub async fn update<R: Table>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(replace_draft::<R>(&state, id, draft).await?))
}

/// DELETE /api/v1/admin/{resource}/:id
pub async fn delete<R: Table>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    store::<R>(&state).delete(id).await?;

    info!(resource = R::NAME, id = %id, "{} deleted", R::LABEL);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/{resource}/:id/flags/:flag
pub async fn set_flag<R: Table>(
    State(state): State<AppState>,
    Path((id, flag)): Path<(Uuid, String)>,
    Json(request): Json<FlagRequest>,
) -> Result<Json<R>, ApiError> {
    let column = parse_flag::<R>(&flag)?;
    let record = store::<R>(&state)
        .set_flag(id, column, request.value)
        .await?;

    info!(resource = R::NAME, id = %id, flag = column, value = request.value, "Flag set");
    Ok(Json(record))
}

/// Admin routes for one resource, to be nested under its path.
pub fn admin_routes<R: Table>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/:id",
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
        .route("/:id/flags/:flag", put(set_flag::<R>))
}
