//! Ministry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_http_url, validate_required};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

/// A person leading a ministry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Leader {
    #[validate(custom(function = "validate_required"))]
    pub name: String,
    pub role: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ministry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub leaders: Vec<Leader>,
    pub hero_title: Option<String>,
    /// Paragraphs of the ministry's story page.
    pub story_content: Vec<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct MinistryDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(custom(function = "validate_required"))]
    pub description: String,

    pub features: Vec<String>,

    #[validate(nested)]
    pub leaders: Vec<Leader>,

    pub hero_title: Option<String>,
    pub story_content: Vec<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,

    pub active: bool,
}

impl Default for MinistryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            features: Vec::new(),
            leaders: Vec::new(),
            hero_title: None,
            story_content: Vec::new(),
            image_url: None,
            active: true,
        }
    }
}

impl Resource for Ministry {
    type Draft = MinistryDraft;

    const NAME: &'static str = "ministries";
    const LABEL: &'static str = "Ministry";
    const ORDER_COLUMNS: &'static [&'static str] = &["title", "created_at", "updated_at"];
    const DEFAULT_ORDER: OrderBy = OrderBy::asc("title");
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

    fn to_draft(&self) -> MinistryDraft {
        MinistryDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            features: self.features.clone(),
            leaders: self.leaders.clone(),
            hero_title: self.hero_title.clone(),
            story_content: self.story_content.clone(),
            image_url: self.image_url.clone(),
            active: self.active,
        }
    }

    /// Drops empty entries left behind by list inputs.
    fn prepare_draft(draft: &mut MinistryDraft, _existing: Option<&Self>) {
        draft.features.retain(|f| !f.trim().is_empty());
        draft.story_content.retain(|p| !p.trim().is_empty());
    }

    fn materialize(
        id: Uuid,
        draft: MinistryDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            features: draft.features,
            leaders: draft.leaders,
            hero_title: draft.hero_title,
            story_content: draft.story_content,
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
