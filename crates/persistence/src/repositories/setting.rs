//! Site settings repository.
//!
//! Values are validated by the caller; this layer stores whatever JSON it is
//! given under a known key and returns the stored row.

use domain::models::{Setting, SettingKey};
use sqlx::PgPool;

use crate::entities::SettingEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct SettingRepository {
    pool: PgPool,
}

impl SettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All stored settings with known keys, ordered by key.
    pub async fn list(&self) -> Result<Vec<Setting>, sqlx::Error> {
        let timer = QueryTimer::new("list", "settings");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            SELECT * FROM settings ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(result?
            .into_iter()
            .filter_map(SettingEntity::into_setting)
            .collect())
    }

    pub async fn find(&self, key: SettingKey) -> Result<Option<Setting>, sqlx::Error> {
        let timer = QueryTimer::new("find", "settings");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            SELECT * FROM settings WHERE key = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result?.and_then(SettingEntity::into_setting))
    }

    /// Inserts or replaces a setting and returns the stored row.
    pub async fn upsert(
        &self,
        key: SettingKey,
        value: serde_json::Value,
    ) -> Result<Setting, sqlx::Error> {
        let timer = QueryTimer::new("upsert", "settings");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        result?.into_setting().ok_or(sqlx::Error::RowNotFound)
    }
}
