//! Children's ministry classes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_http_url, validate_required};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KidsClass {
    pub id: Uuid,
    pub name: String,
    pub age_range: String,
    pub description: Option<String>,
    pub teacher: Option<String>,
    pub schedule: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct KidsClassDraft {
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    #[validate(custom(function = "validate_required"))]
    pub age_range: String,

    pub description: Option<String>,
    pub teacher: Option<String>,
    pub schedule: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,

    pub active: bool,
}

impl Default for KidsClassDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age_range: String::new(),
            description: None,
            teacher: None,
            schedule: None,
            image_url: None,
            active: true,
        }
    }
}

impl Resource for KidsClass {
    type Draft = KidsClassDraft;

    const NAME: &'static str = "kids-classes";
    const LABEL: &'static str = "Kids class";
    const ORDER_COLUMNS: &'static [&'static str] = &["name", "age_range", "created_at"];
    const DEFAULT_ORDER: OrderBy = OrderBy::asc("name");
    const FLAGS: &'static [&'static str] = &["active"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "active").then_some(self.active)
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        if name == "active" {
            self.active = value;
            true
        } else {
            false
        }
    }

    fn to_draft(&self) -> KidsClassDraft {
        KidsClassDraft {
            name: self.name.clone(),
            age_range: self.age_range.clone(),
            description: self.description.clone(),
            teacher: self.teacher.clone(),
            schedule: self.schedule.clone(),
            image_url: self.image_url.clone(),
            active: self.active,
        }
    }

    fn materialize(
        id: Uuid,
        draft: KidsClassDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            age_range: draft.age_range,
            description: draft.description,
            teacher: draft.teacher,
            schedule: draft.schedule,
            image_url: draft.image_url,
            active: draft.active,
            created_at,
            updated_at,
        }
    }

    fn is_public(&self) -> bool {
        self.active
    }
}
