//! Contact message entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ContactMessage;

/// Database row mapping for the contact_messages table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactMessageEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactMessageEntity> for ContactMessage {
    fn from(e: ContactMessageEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            subject: e.subject,
            message: e.message,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
