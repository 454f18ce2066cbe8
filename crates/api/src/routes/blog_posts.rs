//! Public blog post lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::BlogPost;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::resources::store;

/// Get a published post by slug.
///
/// GET /api/v1/blog-posts/:slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    store::<BlogPost>(&state)
        .find_published_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))
}
