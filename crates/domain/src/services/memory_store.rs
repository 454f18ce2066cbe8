//! In-process [`ResourceStore`] used by tests and previews.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::resource::{OrderBy, Resource, ResourceStore, Scope, StoreError};

pub struct MemoryStore<R: Resource> {
    rows: RwLock<Vec<R>>,
    fail_next: Mutex<Option<StoreError>>,
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
            fail_next: Mutex::new(None),
        }
    }

    /// Makes the next operation fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(err);
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match self.fail_next.lock() {
            Ok(mut slot) => slot.take().map_or(Ok(()), Err),
            Err(_) => Err(StoreError::Backend("memory store lock poisoned".into())),
        }
    }

    fn not_found() -> StoreError {
        StoreError::NotFound(R::LABEL.to_string())
    }
}

/// Orders rows by a column through their JSON form.
fn compare_by_column<R: Resource>(a: &R, b: &R, column: &str) -> Ordering {
    let key = camel_case(column);
    let a = serde_json::to_value(a).ok().and_then(|v| v.get(&key).cloned());
    let b = serde_json::to_value(b).ok().and_then(|v| v.get(&key).cloned());
    compare_json(a.as_ref(), b.as_ref())
}

fn compare_json(a: Option<&serde_json::Value>, b: Option<&serde_json::Value>) -> Ordering {
    use serde_json::Value;

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // nulls sort last
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn camel_case(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut upper = false;
    for c in column.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryStore<R> {
    async fn list(&self, scope: Scope, order: OrderBy) -> Result<Vec<R>, StoreError> {
        self.take_failure()?;
        let mut rows: Vec<R> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|r| scope == Scope::All || r.is_public())
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = compare_by_column(a, b, order.column);
            if order.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        self.take_failure()?;
        Ok(self.rows.read().await.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, draft: R::Draft) -> Result<R, StoreError> {
        self.take_failure()?;
        let now = Utc::now();
        let record = R::materialize(Uuid::new_v4(), draft, now, now);
        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, draft: R::Draft) -> Result<R, StoreError> {
        self.take_failure()?;
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(Self::not_found)?;

        *slot = R::materialize(id, draft, slot.created_at(), Utc::now());
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.take_failure()?;
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(Self::not_found)?;
        rows.remove(index);
        Ok(())
    }

    async fn set_flag(&self, id: Uuid, flag: &'static str, value: bool) -> Result<R, StoreError> {
        self.take_failure()?;
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(Self::not_found)?;

        if !slot.set_flag(flag, value) {
            return Err(StoreError::Validation(format!(
                "Unknown flag '{}' for {}",
                flag,
                R::NAME
            )));
        }
        Ok(slot.clone())
    }
}
