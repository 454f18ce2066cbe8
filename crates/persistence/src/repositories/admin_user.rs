//! Admin user repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminUserEntity;
use crate::metrics::QueryTimer;

/// Repository for administrator accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email address, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_by_email", "admin_users");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT * FROM admin_users WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find", "admin_users");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT * FROM admin_users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an active admin account.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<AdminUserEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert", "admin_users");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            INSERT INTO admin_users (email, password_hash, display_name, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(email.trim())
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an admin's last login timestamp.
    pub async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("record_login", "admin_users");
        sqlx::query(
            r#"
            UPDATE admin_users
            SET last_login_at = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }
}
