//! Setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Setting, SettingKey};

/// Database row mapping for the settings table.
#[derive(Debug, Clone, FromRow)]
pub struct SettingEntity {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SettingEntity {
    /// Converts to the domain model. Rows with unknown keys yield `None`.
    pub fn into_setting(self) -> Option<Setting> {
        let key = SettingKey::parse(&self.key)?;
        Some(Setting {
            key,
            value: self.value,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(key: &str) -> SettingEntity {
        SettingEntity {
            key: key.to_string(),
            value: json!({"name": "Grace Chapel"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_known_key_converts() {
        let setting = entity("church_info").into_setting().unwrap();
        assert_eq!(setting.key, SettingKey::ChurchInfo);
        assert_eq!(setting.value["name"], "Grace Chapel");
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        assert!(entity("legacy_theme").into_setting().is_none());
    }
}
