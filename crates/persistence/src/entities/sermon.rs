//! Sermon entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Sermon;

/// Database row mapping for the sermons table.
#[derive(Debug, Clone, FromRow)]
pub struct SermonEntity {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub youtube_url: String,
    pub youtube_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SermonEntity> for Sermon {
    fn from(e: SermonEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            speaker: e.speaker,
            description: e.description,
            youtube_url: e.youtube_url,
            youtube_id: e.youtube_id,
            thumbnail_url: e.thumbnail_url,
            featured: e.featured,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
