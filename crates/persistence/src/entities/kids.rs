//! Kids ministry entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{KidsClass, KidsGalleryItem};

/// Database row mapping for the kids_classes table.
#[derive(Debug, Clone, FromRow)]
pub struct KidsClassEntity {
    pub id: Uuid,
    pub name: String,
    pub age_range: String,
    pub description: Option<String>,
    pub teacher: Option<String>,
    pub schedule: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<KidsClassEntity> for KidsClass {
    fn from(e: KidsClassEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            age_range: e.age_range,
            description: e.description,
            teacher: e.teacher,
            schedule: e.schedule,
            image_url: e.image_url,
            active: e.active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the kids_gallery table.
#[derive(Debug, Clone, FromRow)]
pub struct KidsGalleryItemEntity {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<KidsGalleryItemEntity> for KidsGalleryItem {
    fn from(e: KidsGalleryItemEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            image_url: e.image_url,
            caption: e.caption,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
