//! Prayer requests submitted from the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{is_blank, validate_required};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub request: String,
    pub anonymous: bool,
    pub urgent: bool,
    pub answered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
#[validate(schema(function = "validate_requester"))]
pub struct PrayerRequestDraft {
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_required"))]
    pub request: String,

    pub anonymous: bool,
    pub urgent: bool,
    pub answered: bool,
}

/// A name is required unless the request is anonymous.
fn validate_requester(draft: &PrayerRequestDraft) -> Result<(), ValidationError> {
    if draft.anonymous || draft.name.as_deref().map_or(false, |n| !is_blank(n)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("name_required");
        err.message = Some("Name is required unless the request is anonymous".into());
        Err(err)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v)).map(|v| v.trim().to_string())
}

impl Resource for PrayerRequest {
    type Draft = PrayerRequestDraft;

    const NAME: &'static str = "prayer-requests";
    const LABEL: &'static str = "Prayer request";
    const ORDER_COLUMNS: &'static [&'static str] =
        &["created_at", "updated_at", "name", "urgent", "answered"];
    const DEFAULT_ORDER: OrderBy = OrderBy::desc("created_at");
    const FLAGS: &'static [&'static str] = &["anonymous", "urgent", "answered"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "anonymous" => Some(self.anonymous),
            "urgent" => Some(self.urgent),
            "answered" => Some(self.answered),
            _ => None,
        }
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        let slot = match name {
            "anonymous" => &mut self.anonymous,
            "urgent" => &mut self.urgent,
            "answered" => &mut self.answered,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn to_draft(&self) -> PrayerRequestDraft {
        PrayerRequestDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            request: self.request.clone(),
            anonymous: self.anonymous,
            urgent: self.urgent,
            answered: self.answered,
        }
    }

    fn prepare_draft(draft: &mut PrayerRequestDraft, _existing: Option<&Self>) {
        draft.name = non_blank(draft.name.take());
        draft.email = non_blank(draft.email.take());
    }

    fn materialize(
        id: Uuid,
        draft: PrayerRequestDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            request: draft.request,
            anonymous: draft.anonymous,
            urgent: draft.urgent,
            answered: draft.answered,
            created_at,
            updated_at,
        }
    }

    fn is_public(&self) -> bool {
        false
    }
}
