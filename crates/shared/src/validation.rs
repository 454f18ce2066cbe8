//! Common validation utilities.

use validator::ValidationError;

use crate::slug::is_slug;
use crate::video::parse_video_url;

/// Returns true if the value is empty or only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates that a required text field is not empty or whitespace-only.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an image or link field holds an absolute http(s) URL.
///
/// Empty strings are accepted so that optional form fields can be cleared.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => {
            let mut err = ValidationError::new("http_url");
            err.message = Some("Must be an http(s) URL".into());
            Err(err)
        }
    }
}

/// Validates that a manually entered slug is already in canonical form.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_slug(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug may only contain lowercase letters, digits and single hyphens".into());
        Err(err)
    }
}

/// Validates that a video link points at a recognisable video.
pub fn validate_video_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_video_url(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("video_url");
        err.message = Some("Not a recognised video link".into());
        Err(err)
    }
}

fn required_then(
    value: &str,
    check: fn(&str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    validate_required(value)?;
    check(value)
}

/// Required http(s) URL.
pub fn validate_required_http_url(value: &str) -> Result<(), ValidationError> {
    required_then(value, validate_http_url)
}

/// Required slug in canonical form.
pub fn validate_required_slug(value: &str) -> Result<(), ValidationError> {
    required_then(value, validate_slug)
}

/// Required, recognisable video link.
pub fn validate_required_video_url(value: &str) -> Result<(), ValidationError> {
    required_then(value, validate_video_url)
}
