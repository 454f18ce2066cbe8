//! JSC zone entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Zone;

/// Database row mapping for the zones table.
#[derive(Debug, Clone, FromRow)]
pub struct ZoneEntity {
    pub id: Uuid,
    pub name: String,
    pub day: String,
    pub time: Option<String>,
    pub location: String,
    pub leader: Option<String>,
    pub focus: Option<String>,
    pub members: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ZoneEntity> for Zone {
    fn from(e: ZoneEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            day: e.day,
            time: e.time,
            location: e.location,
            leader: e.leader,
            focus: e.focus,
            members: e.members,
            active: e.active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
