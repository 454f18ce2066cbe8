//! Blog post model.
//!
//! Slugs are derived from the title when a post is created. Once a post
//! exists its slug only changes when the editor explicitly supplies a new one,
//! so published links keep working after a title edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::slug::slugify;
use shared::validation::{is_blank, validate_http_url, validate_required, validate_required_slug};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPostDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(custom(function = "validate_required_slug"))]
    pub slug: String,

    #[validate(custom(function = "validate_required"))]
    pub content: String,

    pub excerpt: Option<String>,
    pub author: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,

    pub published: bool,
}

impl Resource for BlogPost {
    type Draft = BlogPostDraft;

    const NAME: &'static str = "blog-posts";
    const LABEL: &'static str = "Blog post";
    const ORDER_COLUMNS: &'static [&'static str] =
        &["created_at", "updated_at", "title", "slug", "author"];
    const DEFAULT_ORDER: OrderBy = OrderBy::desc("created_at");
    const FLAGS: &'static [&'static str] = &["published"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "published").then_some(self.published)
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        if name == "published" {
            self.published = value;
            true
        } else {
            false
        }
    }

    fn to_draft(&self) -> BlogPostDraft {
        BlogPostDraft {
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            image_url: self.image_url.clone(),
            published: self.published,
        }
    }

    fn prepare_draft(draft: &mut BlogPostDraft, existing: Option<&Self>) {
        draft.slug = if !is_blank(&draft.slug) {
            slugify(&draft.slug)
        } else if let Some(post) = existing {
            post.slug.clone()
        } else {
            slugify(&draft.title)
        };
    }

    fn materialize(
        id: Uuid,
        draft: BlogPostDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
            excerpt: draft.excerpt,
            author: draft.author,
            image_url: draft.image_url,
            published: draft.published,
            created_at,
            updated_at,
        }
    }

    fn is_public(&self) -> bool {
        self.published
    }
}
