//! Prayer request entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::PrayerRequest;

/// Database row mapping for the prayer_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct PrayerRequestEntity {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub request: String,
    pub anonymous: bool,
    pub urgent: bool,
    pub answered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PrayerRequestEntity> for PrayerRequest {
    fn from(e: PrayerRequestEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            request: e.request,
            anonymous: e.anonymous,
            urgent: e.urgent,
            answered: e.answered,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
