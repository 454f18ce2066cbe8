//! Public form submissions: prayer requests and contact messages.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use domain::models::{ContactMessage, ContactMessageDraft, PrayerRequest, PrayerRequestDraft};
use domain::Resource;
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_submission;
use crate::routes::resources::insert_draft;

/// Acknowledgement returned to the submitter. Stored content is never echoed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    fn of<R: Resource>(record: &R) -> Self {
        Self {
            id: record.id(),
            received_at: record.created_at(),
        }
    }
}

/// POST /api/v1/prayer-requests
pub async fn submit_prayer_request(
    State(state): State<AppState>,
    Json(mut draft): Json<PrayerRequestDraft>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), ApiError> {
    // Only staff mark requests as answered.
    draft.answered = false;

    let request = insert_draft::<PrayerRequest>(&state, draft).await?;
    record_submission("prayer_request");
    Ok((StatusCode::CREATED, Json(SubmissionReceipt::of(&request))))
}

/// POST /api/v1/contact-messages
pub async fn submit_contact_message(
    State(state): State<AppState>,
    Json(draft): Json<ContactMessageDraft>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), ApiError> {
    let message = insert_draft::<ContactMessage>(&state, draft).await?;
    record_submission("contact_message");
    Ok((StatusCode::CREATED, Json(SubmissionReceipt::of(&message))))
}
