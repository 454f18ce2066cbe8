//! Testimonials shown on the home page.
//!
//! The optional email loosely links a testimonial to contact messages sent
//! from the same address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{is_blank, validate_http_url, validate_required};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialDraft {
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    pub role: Option<String>,

    #[validate(custom(function = "validate_required"))]
    pub content: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub featured: bool,
}

impl Default for TestimonialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            content: String::new(),
            rating: 5,
            image_url: None,
            email: None,
            featured: false,
        }
    }
}

impl Resource for Testimonial {
    type Draft = TestimonialDraft;

    const NAME: &'static str = "testimonials";
    const LABEL: &'static str = "Testimonial";
    const ORDER_COLUMNS: &'static [&'static str] =
        &["created_at", "updated_at", "name", "rating"];
    const DEFAULT_ORDER: OrderBy = OrderBy::desc("created_at");
    const FLAGS: &'static [&'static str] = &["featured"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "featured").then_some(self.featured)
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        if name == "featured" {
            self.featured = value;
            true
        } else {
            false
        }
    }

    fn to_draft(&self) -> TestimonialDraft {
        TestimonialDraft {
            name: self.name.clone(),
            role: self.role.clone(),
            content: self.content.clone(),
            rating: self.rating,
            image_url: self.image_url.clone(),
            email: self.email.clone(),
            featured: self.featured,
        }
    }

    fn prepare_draft(draft: &mut TestimonialDraft, _existing: Option<&Self>) {
        draft.email = draft
            .email
            .take()
            .filter(|e| !is_blank(e))
            .map(|e| e.trim().to_string());
    }

    fn materialize(
        id: Uuid,
        draft: TestimonialDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            content: draft.content,
            rating: draft.rating,
            image_url: draft.image_url,
            email: draft.email,
            featured: draft.featured,
            created_at,
            updated_at,
        }
    }
}
