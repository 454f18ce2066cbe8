//! Video URL parsing.
//!
//! Recognises the common YouTube URL shapes and derives the canonical watch,
//! embed and thumbnail URLs from the 11-character video identifier.

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref VIDEO_URL: Regex = Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)"
    )
    .unwrap();
}

/// A reference to a single hosted video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub video_id: String,
}

impl VideoRef {
    /// Canonical watch URL, used as the key for metadata lookups.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Embeddable player URL.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }

    /// Default high-quality thumbnail.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.video_id)
    }
}

/// Extracts the video identifier from a pasted URL.
///
/// Returns `None` when the input does not look like any known video URL.
pub fn parse_video_url(url: &str) -> Option<VideoRef> {
    VIDEO_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| VideoRef {
            video_id: m.as_str().to_string(),
        })
}
