//! JSC zone model: neighbourhood small groups meeting on a weekday.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_required;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub day: String,
    pub time: Option<String>,
    pub location: String,
    pub leader: Option<String>,
    pub focus: Option<String>,
    pub members: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneDraft {
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    #[validate(custom(function = "validate_required"))]
    pub day: String,

    pub time: Option<String>,

    #[validate(custom(function = "validate_required"))]
    pub location: String,

    pub leader: Option<String>,
    pub focus: Option<String>,

    #[validate(range(min = 0, message = "Members cannot be negative"))]
    pub members: i32,

    pub active: bool,
}

impl Default for ZoneDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            day: String::new(),
            time: None,
            location: String::new(),
            leader: None,
            focus: None,
            members: 0,
            active: true,
        }
    }
}

impl Resource for Zone {
    type Draft = ZoneDraft;

    const NAME: &'static str = "zones";
    const LABEL: &'static str = "Zone";
    const ORDER_COLUMNS: &'static [&'static str] =
        &["name", "day", "members", "created_at", "updated_at"];
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

    fn to_draft(&self) -> ZoneDraft {
        ZoneDraft {
            name: self.name.clone(),
            day: self.day.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            leader: self.leader.clone(),
            focus: self.focus.clone(),
            members: self.members,
            active: self.active,
        }
    }

    fn materialize(
        id: Uuid,
        draft: ZoneDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            day: draft.day,
            time: draft.time,
            location: draft.location,
            leader: draft.leader,
            focus: draft.focus,
            members: draft.members,
            active: draft.active,
            created_at,
            updated_at,
        }
    }

    fn is_public(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ZoneDraft {
        ZoneDraft {
            name: "North Zone".into(),
            day: "Wednesday".into(),
            location: "12 Elm Street".into(),
            members: 14,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_negative_members_rejected() {
        let draft = ZoneDraft {
            members: -1,
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("members"));
    }

    #[test]
    fn test_required_location() {
        let draft = ZoneDraft {
            location: "\t".into(),
            ..valid_draft()
        };
        assert!(draft.validate().is_err());
    }
}
