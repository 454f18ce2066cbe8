//! Testimonial extras.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{ContactMessage, Testimonial};
use domain::ResourceStore;
use shared::validation::is_blank;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::resources::{store, ListResponse};

/// Contact messages sent from the testimonial's email address.
///
/// GET /api/v1/admin/testimonials/:id/messages
pub async fn messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListResponse<ContactMessage>>, ApiError> {
    let testimonial = store::<Testimonial>(&state)
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Testimonial not found".to_string()))?;

    let messages = match testimonial.email.as_deref() {
        Some(email) if !is_blank(email) => {
            store::<ContactMessage>(&state).find_by_email(email).await?
        }
        _ => Vec::new(),
    };

    Ok(Json(messages.into()))
}
