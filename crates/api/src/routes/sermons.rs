//! Sermon admin routes.
//!
//! Sermons use the generic CRUD handlers except for create and update, which
//! fill a blank title from video metadata before validation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use domain::models::{Sermon, SermonDraft};
use serde::{Deserialize, Serialize};
use shared::validation::is_blank;
use shared::video::parse_video_url;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::resources::{self, insert_draft, replace_draft};
use crate::services::VideoMetadataClient;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub url: String,
}

/// Everything a sermon form can pre-fill from a pasted link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub video_id: String,
    pub watch_url: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Fills a blank title (and thumbnail) from metadata for the draft's video.
pub(crate) async fn enrich_draft(video: &VideoMetadataClient, draft: &mut SermonDraft) {
    if !is_blank(&draft.title) {
        return;
    }
    let Some(video_ref) = parse_video_url(&draft.youtube_url) else {
        return;
    };
    if let Some(metadata) = video.lookup(&video_ref).await {
        draft.fill_from_metadata(metadata.title.as_deref(), metadata.thumbnail_url.as_deref());
    }
}

/// Resolve a pasted video link.
///
/// POST /api/v1/admin/sermons/lookup
pub async fn lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    let video = parse_video_url(&request.url)
        .ok_or_else(|| ApiError::Validation("Not a recognised video link".to_string()))?;

    let metadata = state.video.lookup(&video).await.unwrap_or_default();

    Ok(Json(LookupResponse {
        watch_url: video.watch_url(),
        embed_url: video.embed_url(),
        thumbnail_url: metadata
            .thumbnail_url
            .unwrap_or_else(|| video.thumbnail_url()),
        title: metadata.title,
        video_id: video.video_id,
    }))
}

/// POST /api/v1/admin/sermons
pub async fn create(
    State(state): State<AppState>,
    Json(mut draft): Json<SermonDraft>,
) -> Result<(StatusCode, Json<Sermon>), ApiError> {
    enrich_draft(&state.video, &mut draft).await;
    let sermon = insert_draft::<Sermon>(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(sermon)))
}

/// PUT /api/v1/admin/sermons/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut draft): Json<SermonDraft>,
) -> Result<Json<Sermon>, ApiError> {
    enrich_draft(&state.video, &mut draft).await;
    Ok(Json(replace_draft::<Sermon>(&state, id, draft).await?))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(resources::list::<Sermon>).post(create))
        .route("/lookup", post(lookup))
        .route(
            "/:id",
            get(resources::get_one::<Sermon>)
                .put(update)
                .delete(resources::delete::<Sermon>),
        )
        .route("/:id/flags/:flag", put(resources::set_flag::<Sermon>))
}
