//! The contract shared by every editable content type.
//!
//! A [`Resource`] describes one record shape: its writable [`Resource::Draft`],
//! which columns it may be ordered by, which boolean flags may be toggled and
//! which rows the public site may see. A [`ResourceStore`] persists resources;
//! PostgreSQL and in-memory implementations exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Error type for store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Which rows a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every row (admin views).
    All,
    /// Only rows visible on the public site.
    Public,
}

/// A validated ordering. `column` always comes from a resource whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }

    /// Resolves a requested ordering against the resource's whitelist.
    ///
    /// A missing column falls back to the resource default; a missing
    /// direction keeps the default direction for that column.
    pub fn parse<R: Resource>(
        column: Option<&str>,
        ascending: Option<bool>,
    ) -> Result<Self, StoreError> {
        let default = R::DEFAULT_ORDER;
        let column = match column {
            None => default.column,
            Some(requested) => R::ORDER_COLUMNS
                .iter()
                .copied()
                .find(|c| *c == requested)
                .ok_or_else(|| {
                    StoreError::Validation(format!(
                        "Cannot order {} by '{}'; allowed: {}",
                        R::NAME,
                        requested,
                        R::ORDER_COLUMNS.join(", ")
                    ))
                })?,
        };

        Ok(Self {
            column,
            ascending: ascending.unwrap_or(default.ascending),
        })
    }
}

/// Resolves a flag name against the resource's whitelist.
pub fn parse_flag<R: Resource>(name: &str) -> Result<&'static str, StoreError> {
    R::FLAGS
        .iter()
        .copied()
        .find(|f| *f == name)
        .ok_or_else(|| {
            if R::FLAGS.is_empty() {
                StoreError::Validation(format!("{} have no flags", R::NAME))
            } else {
                StoreError::Validation(format!(
                    "Unknown flag '{}' for {}; allowed: {}",
                    name,
                    R::NAME,
                    R::FLAGS.join(", ")
                ))
            }
        })
}

/// One editable content type.
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Writable shape of a record, as held by a form.
    type Draft: Validate + Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static;

    /// Plural name, used for tables and route segments.
    const NAME: &'static str;
    /// Singular human-readable label, used in messages.
    const LABEL: &'static str;
    const ORDER_COLUMNS: &'static [&'static str];
    const DEFAULT_ORDER: OrderBy;
    const FLAGS: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Reads a whitelisted boolean flag.
    fn flag(&self, _name: &str) -> Option<bool> {
        None
    }

    /// Writes a whitelisted boolean flag. Returns false for unknown flags.
    fn set_flag(&mut self, _name: &str, _value: bool) -> bool {
        false
    }

    /// Copies the writable fields of a stored record into a draft.
    fn to_draft(&self) -> Self::Draft;

    /// Fills derived fields before validation.
    ///
    /// `existing` is the stored record when the draft updates one.
    fn prepare_draft(_draft: &mut Self::Draft, _existing: Option<&Self>) {}

    /// Builds a record from a prepared, validated draft.
    fn materialize(
        id: Uuid,
        draft: Self::Draft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self;

    fn is_public(&self) -> bool {
        true
    }
}

/// Derives fields and validates a draft in one step.
pub fn prepare_and_validate<R: Resource>(
    mut draft: R::Draft,
    existing: Option<&R>,
) -> Result<R::Draft, ValidationErrors> {
    R::prepare_draft(&mut draft, existing);
    draft.validate()?;
    Ok(draft)
}

/// Persistence for one resource type.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    async fn list(&self, scope: Scope, order: OrderBy) -> Result<Vec<R>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// Inserts a prepared draft and returns the stored record.
    async fn insert(&self, draft: R::Draft) -> Result<R, StoreError>;

    /// Replaces the writable fields of a record and returns the stored record.
    async fn update(&self, id: Uuid, draft: R::Draft) -> Result<R, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Sets one whitelisted flag column and returns the stored record.
    async fn set_flag(&self, id: Uuid, flag: &'static str, value: bool) -> Result<R, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactMessage, Event};

    #[test]
    fn test_order_parse_defaults() {
        let order = OrderBy::parse::<Event>(None, None).unwrap();
        assert_eq!(order, Event::DEFAULT_ORDER);
    }

    #[test]
    fn test_order_parse_whitelisted_column() {
        let order = OrderBy::parse::<Event>(Some("title"), Some(true)).unwrap();
        assert_eq!(order.column, "title");
        assert!(order.ascending);
    }

    #[test]
    fn test_order_parse_rejects_unknown_column() {
        let err = OrderBy::parse::<Event>(Some("title; DROP TABLE events"), None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(err.to_string().contains("allowed"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag::<Event>("featured").unwrap(), "featured");
        assert!(matches!(
            parse_flag::<Event>("published"),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_flag_on_flagless_resource() {
        let err = parse_flag::<ContactMessage>("featured").unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation("contact-messages have no flags".to_string())
        );
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::NotFound("Event".into()).to_string(),
            "Event not found"
        );
        assert!(StoreError::Backend("pool closed".into())
            .to_string()
            .contains("pool closed"));
    }
}
