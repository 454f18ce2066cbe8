//! Best-effort video metadata lookup over an oEmbed endpoint.
//!
//! A lookup is a single GET with a short timeout. Any failure is logged and
//! reported as "no metadata" so forms fall back to manual entry.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::video::VideoRef;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::VideoConfig;
use crate::middleware::metrics::record_video_lookup;

#[derive(Debug, Error)]
pub enum VideoMetadataError {
    #[error("Video metadata lookup is disabled")]
    Disabled,

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata endpoint returned status {0}")]
    Status(u16),
}

/// Metadata fields used to pre-fill forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<OEmbedResponse> for VideoMetadata {
    fn from(response: OEmbedResponse) -> Self {
        Self {
            title: non_blank(response.title),
            thumbnail_url: non_blank(response.thumbnail_url),
        }
    }
}

/// HTTP client for the metadata endpoint. Shared across requests.
#[derive(Debug, Clone)]
pub struct VideoMetadataClient {
    client: Option<Client>,
    endpoint: String,
    timeout_ms: u64,
}

impl VideoMetadataClient {
    pub fn new(config: &VideoConfig) -> Result<Self, VideoMetadataError> {
        let client = if config.enabled && !config.oembed_url.trim().is_empty() {
            Some(
                Client::builder()
                    .timeout(Duration::from_millis(config.timeout_ms))
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            client,
            endpoint: config.oembed_url.trim().to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// A client that never performs lookups.
    pub fn disabled() -> Self {
        Self {
            client: None,
            endpoint: String::new(),
            timeout_ms: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Fetches metadata for a video.
    pub async fn fetch(&self, video: &VideoRef) -> Result<VideoMetadata, VideoMetadataError> {
        let client = self.client.as_ref().ok_or(VideoMetadataError::Disabled)?;
        let watch_url = video.watch_url();

        let response = client
            .get(&self.endpoint)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VideoMetadataError::Status(status.as_u16()));
        }

        let body: OEmbedResponse = response.json().await.map_err(|e| self.classify(e))?;
        Ok(body.into())
    }

    /// Like [`fetch`](Self::fetch) but degrades every failure to `None`.
    pub async fn lookup(&self, video: &VideoRef) -> Option<VideoMetadata> {
        match self.fetch(video).await {
            Ok(metadata) => {
                debug!(video_id = %video.video_id, "Video metadata found");
                record_video_lookup("hit");
                Some(metadata)
            }
            Err(VideoMetadataError::Disabled) => {
                record_video_lookup("disabled");
                None
            }
            Err(VideoMetadataError::Status(404)) => {
                debug!(video_id = %video.video_id, "No metadata for video");
                record_video_lookup("miss");
                None
            }
            Err(e) => {
                warn!(video_id = %video.video_id, error = %e, "Video metadata lookup failed");
                record_video_lookup("error");
                None
            }
        }
    }

    fn classify(&self, err: reqwest::Error) -> VideoMetadataError {
        if err.is_timeout() {
            VideoMetadataError::Timeout(self.timeout_ms)
        } else {
            VideoMetadataError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/oembed", addr)
    }

    fn client_for(endpoint: String, timeout_ms: u64) -> VideoMetadataClient {
        VideoMetadataClient::new(&VideoConfig {
            enabled: true,
            oembed_url: endpoint,
            timeout_ms,
        })
        .unwrap()
    }

    fn video() -> VideoRef {
        VideoRef {
            video_id: "dQw4w9WgXcQ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_reads_title_and_thumbnail() {
        let router = Router::new().route(
            "/oembed",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("format").map(String::as_str), Some("json"));
                assert_eq!(
                    params.get("url").map(String::as_str),
                    Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
                );
                Json(json!({
                    "title": "Sunday Service",
                    "thumbnail_url": "https://img.example.com/t.jpg",
                    "author_name": "Grace Church"
                }))
            }),
        );
        let client = client_for(serve(router).await, 2000);

        let metadata = client.lookup(&video()).await.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Sunday Service"));
        assert_eq!(
            metadata.thumbnail_url.as_deref(),
            Some("https://img.example.com/t.jpg")
        );
    }

    #[tokio::test]
    async fn test_lookup_blank_fields_become_none() {
        let router = Router::new().route(
            "/oembed",
            get(|| async { Json(json!({ "title": "  " })) }),
        );
        let client = client_for(serve(router).await, 2000);

        assert_eq!(client.lookup(&video()).await, Some(VideoMetadata::default()));
    }

    #[tokio::test]
    async fn test_lookup_error_status_degrades_to_none() {
        let router = Router::new().route(
            "/oembed",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(Value::Null)) }),
        );
        let client = client_for(serve(router).await, 2000);

        assert!(matches!(
            client.fetch(&video()).await,
            Err(VideoMetadataError::Status(401))
        ));
        assert!(client.lookup(&video()).await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_timeout_degrades_to_none() {
        let router = Router::new().route(
            "/oembed",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "title": "late" }))
            }),
        );
        let client = client_for(serve(router).await, 50);

        assert!(matches!(
            client.fetch(&video()).await,
            Err(VideoMetadataError::Timeout(50))
        ));
        assert!(client.lookup(&video()).await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_client_never_looks_up() {
        let client = VideoMetadataClient::disabled();
        assert!(!client.is_enabled());
        assert!(client.lookup(&video()).await.is_none());

        let from_config = VideoMetadataClient::new(&VideoConfig {
            enabled: false,
            ..VideoConfig::default()
        })
        .unwrap();
        assert!(!from_config.is_enabled());
    }
}
