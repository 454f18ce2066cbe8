//! Site settings.
//!
//! Settings are singleton JSON documents keyed by name. Every known key has a
//! typed shape; a value is accepted only when it deserializes into that shape
//! and passes its validation.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::validation::{validate_http_url, validate_required};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Known setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    ChurchInfo,
    ServiceSchedule,
    SocialLinks,
    Seo,
    AboutPage,
    ContactPage,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::ChurchInfo,
        SettingKey::ServiceSchedule,
        SettingKey::SocialLinks,
        SettingKey::Seo,
        SettingKey::AboutPage,
        SettingKey::ContactPage,
    ];

    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ChurchInfo => "church_info",
            SettingKey::ServiceSchedule => "service_schedule",
            SettingKey::SocialLinks => "social_links",
            SettingKey::Seo => "seo",
            SettingKey::AboutPage => "about_page",
            SettingKey::ContactPage => "contact_page",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Checks a value against this key's shape and returns it in canonical form.
    pub fn check_value(&self, value: serde_json::Value) -> Result<serde_json::Value, SettingError> {
        match self {
            SettingKey::ChurchInfo => canonical::<ChurchInfo>(value),
            SettingKey::ServiceSchedule => canonical::<ServiceSchedule>(value),
            SettingKey::SocialLinks => canonical::<SocialLinks>(value),
            SettingKey::Seo => canonical::<Seo>(value),
            SettingKey::AboutPage => canonical::<AboutPage>(value),
            SettingKey::ContactPage => canonical::<ContactPage>(value),
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for setting values.
#[derive(Debug, Error)]
pub enum SettingError {
    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Setting value has the wrong shape: {0}")]
    Shape(String),

    #[error("Setting value is invalid: {0}")]
    Invalid(#[from] ValidationErrors),
}

fn canonical<T>(value: serde_json::Value) -> Result<serde_json::Value, SettingError>
where
    T: DeserializeOwned + Serialize + Validate,
{
    let typed: T = serde_json::from_value(value).map_err(|e| SettingError::Shape(e.to_string()))?;
    typed.validate()?;
    serde_json::to_value(&typed).map_err(|e| SettingError::Shape(e.to_string()))
}

/// Parses a key and checks its value in one step.
pub fn validate_setting(
    key: &str,
    value: serde_json::Value,
) -> Result<(SettingKey, serde_json::Value), SettingError> {
    let key = SettingKey::parse(key).ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let value = key.check_value(value)?;
    Ok((key, value))
}

/// A stored setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: SettingKey,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ChurchInfo {
    #[validate(custom(function = "validate_required"))]
    pub name: String,
    pub tagline: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceTime {
    #[validate(custom(function = "validate_required"))]
    pub name: String,
    #[validate(custom(function = "validate_required"))]
    pub day: String,
    #[validate(custom(function = "validate_required"))]
    pub time: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceSchedule {
    #[validate(nested)]
    pub services: Vec<ServiceTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialLinks {
    #[validate(custom(function = "validate_http_url"))]
    pub facebook: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub instagram: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub youtube: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub twitter: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub tiktok: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Seo {
    #[validate(length(max = 70, message = "Title should be at most 70 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 160, message = "Description should be at most 160 characters"))]
    pub description: Option<String>,
    pub keywords: Vec<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub og_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AboutPage {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub story: Vec<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub values: Vec<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPage {
    pub heading: Option<String>,
    pub intro: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub office_hours: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub map_embed_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::parse(key.as_str()), Some(key));
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert_eq!(SettingKey::parse("theme"), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = validate_setting("theme", json!({})).unwrap_err();
        assert!(matches!(err, SettingError::UnknownKey(k) if k == "theme"));
    }

    #[test]
    fn test_church_info_accepted_and_canonicalised() {
        let (key, value) = validate_setting(
            "church_info",
            json!({"name": "Grace Chapel", "phone": "555-0100"}),
        )
        .unwrap();
        assert_eq!(key, SettingKey::ChurchInfo);
        assert_eq!(value["name"], "Grace Chapel");
        assert!(value["tagline"].is_null());
    }

    #[test]
    fn test_church_info_requires_name() {
        let err = validate_setting("church_info", json!({"name": "  "})).unwrap_err();
        assert!(matches!(err, SettingError::Invalid(_)));
    }

    #[test]
    fn test_mistyped_value_rejected() {
        let err = validate_setting("service_schedule", json!({"services": "Sunday 10am"}))
            .unwrap_err();
        assert!(matches!(err, SettingError::Shape(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = validate_setting("social_links", json!({"myspace": "https://myspace.com"}))
            .unwrap_err();
        assert!(matches!(err, SettingError::Shape(_)));
    }

    #[test]
    fn test_nested_schedule_validation() {
        let ok = json!({"services": [{"name": "Morning Worship", "day": "Sunday", "time": "9:00"}]});
        assert!(validate_setting("service_schedule", ok).is_ok());

        let bad = json!({"services": [{"name": "Morning Worship", "day": "", "time": "9:00"}]});
        assert!(matches!(
            validate_setting("service_schedule", bad),
            Err(SettingError::Invalid(_))
        ));
    }

    #[test]
    fn test_social_links_must_be_urls() {
        let err = validate_setting("social_links", json!({"facebook": "facebook.com/grace"}))
            .unwrap_err();
        assert!(matches!(err, SettingError::Invalid(_)));
    }
}
