//! Generic PostgreSQL store for content resources.
//!
//! SQL text is assembled only from `'static` identifiers: table and column
//! names come from [`Table`] and ordering/flag columns are resolved against
//! the resource whitelists before they get here. All values are bound.

use std::marker::PhantomData;

use async_trait::async_trait;
use domain::models::{BlogPost, ContactMessage};
use domain::resource::{parse_flag, OrderBy, ResourceStore, Scope, StoreError};
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::entities::{BlogPostEntity, ContactMessageEntity};
use crate::metrics::QueryTimer;
use crate::table::Table;

/// Maps database errors onto store errors.
pub fn store_error(table: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound(table.to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => StoreError::Conflict(
                db_err
                    .constraint()
                    .map(|c| format!("duplicate value violates {}", c))
                    .unwrap_or_else(|| "duplicate value".to_string()),
            ),
            // not_null_violation, check_violation
            Some("23502") | Some("23514") => StoreError::Validation(db_err.message().to_string()),
            _ => {
                error!(table = table, error = %err, "Database error");
                StoreError::Backend(err.to_string())
            }
        },
        _ => {
            error!(table = table, error = %err, "Database error");
            StoreError::Backend(err.to_string())
        }
    }
}

fn placeholders(from: usize, count: usize) -> String {
    (from..from + count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn assignments(columns: &[&str], first_param: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c, first_param + i))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn select_sql<R: Table>(scope: Scope, order: OrderBy) -> String {
    let filter = match (scope, R::PUBLIC_FILTER) {
        (Scope::Public, Some(predicate)) => format!(" WHERE {}", predicate),
        _ => String::new(),
    };
    let direction = if order.ascending { "ASC" } else { "DESC" };
    format!(
        "SELECT * FROM {}{} ORDER BY {} {} NULLS LAST, id",
        R::TABLE,
        filter,
        order.column,
        direction
    )
}

pub(crate) fn insert_sql<R: Table>() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders(1, R::COLUMNS.len())
    )
}

pub(crate) fn update_sql<R: Table>() -> String {
    format!(
        "UPDATE {} SET {}, updated_at = NOW() WHERE id = $1 RETURNING *",
        R::TABLE,
        assignments(R::COLUMNS, 2)
    )
}

/// PostgreSQL implementation of [`ResourceStore`] for any [`Table`].
pub struct PgStore<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for PgStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Table> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetches one row visible in `scope`.
    pub async fn find_in_scope(&self, id: Uuid, scope: Scope) -> Result<Option<R>, StoreError> {
        let filter = match (scope, R::PUBLIC_FILTER) {
            (Scope::Public, Some(predicate)) => format!(" AND {}", predicate),
            _ => String::new(),
        };
        let sql = format!("SELECT * FROM {} WHERE id = $1{}", R::TABLE, filter);

        let timer = QueryTimer::new("find", R::TABLE);
        let result = sqlx::query_as::<_, R::Entity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();

        result
            .map(|row| row.map(Into::into))
            .map_err(|e| store_error(R::TABLE, e))
    }
}

#[async_trait]
impl<R: Table> ResourceStore<R> for PgStore<R> {
    async fn list(&self, scope: Scope, order: OrderBy) -> Result<Vec<R>, StoreError> {
        let sql = select_sql::<R>(scope, order);

        let timer = QueryTimer::new("list", R::TABLE);
        let result = sqlx::query_as::<_, R::Entity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();

        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(|e| store_error(R::TABLE, e))
    }

    async fn find(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        self.find_in_scope(id, Scope::All).await
    }

    async fn insert(&self, draft: R::Draft) -> Result<R, StoreError> {
        let sql = insert_sql::<R>();

        let timer = QueryTimer::new("insert", R::TABLE);
        let query = R::bind_draft(sqlx::query_as::<_, R::Entity>(&sql), draft);
        let result = query.fetch_one(&self.pool).await;
        timer.record();

        result.map(Into::into).map_err(|e| store_error(R::TABLE, e))
    }

    async fn update(&self, id: Uuid, draft: R::Draft) -> Result<R, StoreError> {
        let sql = update_sql::<R>();

        let timer = QueryTimer::new("update", R::TABLE);
        let query = R::bind_draft(sqlx::query_as::<_, R::Entity>(&sql).bind(id), draft);
        let result = query.fetch_optional(&self.pool).await;
        timer.record();

        match result {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => Err(StoreError::NotFound(R::LABEL.to_string())),
            Err(e) => Err(store_error(R::TABLE, e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);

        let timer = QueryTimer::new("delete", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await;
        timer.record();

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(()),
            Ok(_) => Err(StoreError::NotFound(R::LABEL.to_string())),
            Err(e) => Err(store_error(R::TABLE, e)),
        }
    }

    async fn set_flag(&self, id: Uuid, flag: &'static str, value: bool) -> Result<R, StoreError> {
        let column = parse_flag::<R>(flag)?;
        let sql = format!(
            "UPDATE {} SET {} = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
            R::TABLE,
            column
        );

        let timer = QueryTimer::new("set_flag", R::TABLE);
        let result = sqlx::query_as::<_, R::Entity>(&sql)
            .bind(id)
            .bind(value)
            .fetch_optional(&self.pool)
            .await;
        timer.record();

        match result {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => Err(StoreError::NotFound(R::LABEL.to_string())),
            Err(e) => Err(store_error(R::TABLE, e)),
        }
    }
}

impl PgStore<BlogPost> {
    /// Finds a published post by slug.
    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let timer = QueryTimer::new("find_by_slug", BlogPost::TABLE);
        let result = sqlx::query_as::<_, BlogPostEntity>(
            r#"
            SELECT * FROM blog_posts WHERE slug = $1 AND published = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map(|row| row.map(Into::into))
            .map_err(|e| store_error(BlogPost::TABLE, e))
    }
}

impl PgStore<ContactMessage> {
    /// Messages sent from an address, newest first. Matching ignores case.
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<ContactMessage>, StoreError> {
        let timer = QueryTimer::new("find_by_email", ContactMessage::TABLE);
        let result = sqlx::query_as::<_, ContactMessageEntity>(
            r#"
            SELECT * FROM contact_messages
            WHERE LOWER(email) = LOWER($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(email.trim())
        .fetch_all(&self.pool)
        .await;
        timer.record();

        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(|e| store_error(ContactMessage::TABLE, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{Event, Ministry};
    use domain::Resource;

    #[test]
    fn test_select_sql_admin_scope() {
        let sql = select_sql::<Ministry>(Scope::All, OrderBy::asc("title"));
        assert_eq!(
            sql,
            "SELECT * FROM ministries ORDER BY title ASC NULLS LAST, id"
        );
    }

    #[test]
    fn test_select_sql_public_scope() {
        let sql = select_sql::<Ministry>(Scope::Public, OrderBy::desc("created_at"));
        assert_eq!(
            sql,
            "SELECT * FROM ministries WHERE active = TRUE ORDER BY created_at DESC NULLS LAST, id"
        );
    }

    #[test]
    fn test_select_sql_without_filter() {
        let sql = select_sql::<Event>(Scope::Public, Event::DEFAULT_ORDER);
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql::<ContactMessage>(),
            "INSERT INTO contact_messages (name, email, subject, message) VALUES ($1, $2, $3, $4) RETURNING *"
        );
    }

    #[test]
    fn test_update_sql_binds_id_first() {
        assert_eq!(
            update_sql::<ContactMessage>(),
            "UPDATE contact_messages SET name = $2, email = $3, subject = $4, message = $5, updated_at = NOW() WHERE id = $1 RETURNING *"
        );
    }

    #[test]
    fn test_placeholder_count_matches_columns() {
        let sql = insert_sql::<Event>();
        assert!(sql.contains(&format!("${}", Event::COLUMNS.len())));
        assert!(!sql.contains(&format!("${}", Event::COLUMNS.len() + 1)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert_eq!(
            store_error("events", sqlx::Error::RowNotFound),
            StoreError::NotFound("events".to_string())
        );
    }

    #[test]
    fn test_pool_timeout_maps_to_backend() {
        assert!(matches!(
            store_error("events", sqlx::Error::PoolTimedOut),
            StoreError::Backend(_)
        ));
    }
}
