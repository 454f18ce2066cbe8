//! Admin user entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::AdminUser;

/// Database row mapping for the admin_users table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminUserEntity> for AdminUser {
    fn from(e: AdminUserEntity) -> Self {
        Self {
            id: e.id,
            email: e.email,
            password_hash: e.password_hash,
            display_name: e.display_name,
            is_active: e.is_active,
            last_login_at: e.last_login_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
