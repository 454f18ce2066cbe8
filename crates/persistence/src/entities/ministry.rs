//! Ministry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Leader, Ministry};

/// Database row mapping for the ministries table.
#[derive(Debug, Clone, FromRow)]
pub struct MinistryEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub features: Vec<String>, // TEXT[]
    pub leaders: Json<Vec<Leader>>, // JSONB
    pub hero_title: Option<String>,
    pub story_content: Vec<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MinistryEntity> for Ministry {
    fn from(e: MinistryEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            features: e.features,
            leaders: e.leaders.0,
            hero_title: e.hero_title,
            story_content: e.story_content,
            image_url: e.image_url,
            active: e.active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
