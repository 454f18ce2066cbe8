//! Messages sent through the public contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_required;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactMessageDraft {
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub subject: Option<String>,

    #[validate(custom(function = "validate_required"))]
    pub message: String,
}

impl Resource for ContactMessage {
    type Draft = ContactMessageDraft;

    const NAME: &'static str = "contact-messages";
    const LABEL: &'static str = "Contact message";
    const ORDER_COLUMNS: &'static [&'static str] = &["created_at", "name", "email"];
    const DEFAULT_ORDER: OrderBy = OrderBy::desc("created_at");

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn to_draft(&self) -> ContactMessageDraft {
        ContactMessageDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }

    fn prepare_draft(draft: &mut ContactMessageDraft, _existing: Option<&Self>) {
        draft.email = draft.email.trim().to_string();
    }

    fn materialize(
        id: Uuid,
        draft: ContactMessageDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            created_at,
            updated_at,
        }
    }

    fn is_public(&self) -> bool {
        false
    }
}
