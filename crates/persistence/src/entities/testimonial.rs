//! Testimonial entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Testimonial;

/// Database row mapping for the testimonials table.
#[derive(Debug, Clone, FromRow)]
pub struct TestimonialEntity {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TestimonialEntity> for Testimonial {
    fn from(e: TestimonialEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            role: e.role,
            content: e.content,
            rating: e.rating,
            image_url: e.image_url,
            email: e.email,
            featured: e.featured,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
