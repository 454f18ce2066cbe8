//! Church event model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_http_url, validate_required};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

/// A dated event shown on the public events page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,

    pub featured: bool,
}

impl Resource for Event {
    type Draft = EventDraft;

    const NAME: &'static str = "events";
    const LABEL: &'static str = "Event";
    const ORDER_COLUMNS: &'static [&'static str] = &["date", "title", "created_at", "updated_at"];
    const DEFAULT_ORDER: OrderBy = OrderBy::asc("date");
    const FLAGS: &'static [&'static str] = &["featured"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "featured" => Some(self.featured),
            _ => None,
        }
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        match name {
            "featured" => self.featured = value,
            _ => return false,
        }
        true
    }

    fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: Some(self.date),
            time: self.time.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            featured: self.featured,
        }
    }

    fn materialize(
        id: Uuid,
        draft: EventDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date.unwrap_or_default(),
            time: draft.time,
            location: draft.location,
            category: draft.category,
            description: draft.description,
            image_url: draft.image_url,
            featured: draft.featured,
            created_at,
            updated_at,
        }
    }
}
