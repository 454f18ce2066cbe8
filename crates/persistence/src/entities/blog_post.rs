//! Blog post entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::BlogPost;

/// Database row mapping for the blog_posts table.
#[derive(Debug, Clone, FromRow)]
pub struct BlogPostEntity {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPostEntity> for BlogPost {
    fn from(e: BlogPostEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            slug: e.slug,
            content: e.content,
            excerpt: e.excerpt,
            author: e.author,
            image_url: e.image_url,
            published: e.published,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
