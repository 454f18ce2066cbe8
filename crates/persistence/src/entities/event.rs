//! Event entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Event;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(e: EventEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            time: e.time,
            location: e.location,
            category: e.category,
            description: e.description,
            image_url: e.image_url,
            featured: e.featured,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
