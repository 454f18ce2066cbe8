//! Photo gallery items for the kids page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_required, validate_required_http_url};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KidsGalleryItem {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct KidsGalleryItemDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(custom(function = "validate_required_http_url"))]
    pub image_url: String,

    pub caption: Option<String>,
    pub sort_order: i32,
}

impl Resource for KidsGalleryItem {
    type Draft = KidsGalleryItemDraft;

    const NAME: &'static str = "kids-gallery";
    const LABEL: &'static str = "Gallery item";
    const ORDER_COLUMNS: &'static [&'static str] = &["sort_order", "title", "created_at"];
    const DEFAULT_ORDER: OrderBy = OrderBy::asc("sort_order");

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn to_draft(&self) -> KidsGalleryItemDraft {
        KidsGalleryItemDraft {
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            caption: self.caption.clone(),
            sort_order: self.sort_order,
        }
    }

    fn materialize(
        id: Uuid,
        draft: KidsGalleryItemDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            image_url: draft.image_url,
            caption: draft.caption,
            sort_order: draft.sort_order,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_required() {
        let draft = KidsGalleryItemDraft {
            title: "Sunday school picnic".into(),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image_url"));
    }

    #[test]
    fn test_valid_item() {
        let draft = KidsGalleryItemDraft {
            title: "Nativity play".into(),
            image_url: "https://images.example.org/nativity.jpg".into(),
            caption: Some("December 2023".into()),
            sort_order: 3,
        };
        assert!(draft.validate().is_ok());
    }
}
