//! Sermon model. Video id and thumbnail are derived from the pasted link.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{
    is_blank, validate_http_url, validate_required, validate_required_video_url,
};
use shared::video::{parse_video_url, VideoRef};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{OrderBy, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub youtube_url: String,
    pub youtube_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SermonDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    pub speaker: Option<String>,
    pub description: Option<String>,

    #[validate(custom(function = "validate_required_video_url"))]
    pub youtube_url: String,

    pub youtube_id: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub thumbnail_url: Option<String>,

    pub featured: bool,
}

impl SermonDraft {
    /// Fills a blank title and thumbnail from looked-up video metadata.
    pub fn fill_from_metadata(&mut self, title: Option<&str>, thumbnail_url: Option<&str>) {
        if is_blank(&self.title) {
            if let Some(title) = title.filter(|t| !is_blank(t)) {
                self.title = title.trim().to_string();
            }
        }
        if self.thumbnail_url.as_deref().map_or(true, is_blank) {
            if let Some(thumb) = thumbnail_url.filter(|t| !is_blank(t)) {
                self.thumbnail_url = Some(thumb.to_string());
            }
        }
    }
}

impl Sermon {
    /// Whether `thumbnail` is the one stored for this sermon or the default
    /// thumbnail of its video.
    fn has_thumbnail(&self, thumbnail: Option<&str>) -> bool {
        let Some(thumbnail) = thumbnail else {
            return false;
        };
        self.thumbnail_url.as_deref() == Some(thumbnail)
            || self.youtube_id.as_ref().map_or(false, |id| {
                VideoRef {
                    video_id: id.clone(),
                }
                .thumbnail_url()
                    == thumbnail
            })
    }
}

impl Resource for Sermon {
    type Draft = SermonDraft;

    const NAME: &'static str = "sermons";
    const LABEL: &'static str = "Sermon";
    const ORDER_COLUMNS: &'static [&'static str] =
        &["date", "title", "speaker", "created_at", "updated_at"];
    const DEFAULT_ORDER: OrderBy = OrderBy::desc("date");
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

    fn to_draft(&self) -> SermonDraft {
        SermonDraft {
            title: self.title.clone(),
            date: Some(self.date),
            speaker: self.speaker.clone(),
            description: self.description.clone(),
            youtube_url: self.youtube_url.clone(),
            youtube_id: self.youtube_id.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            featured: self.featured,
        }
    }

    /// An unrecognised link leaves the derived fields untouched.
    ///
    /// When an edit switches videos, a thumbnail carried over from the old
    /// video is replaced; a custom thumbnail is kept.
    fn prepare_draft(draft: &mut SermonDraft, existing: Option<&Self>) {
        let Some(video) = parse_video_url(&draft.youtube_url) else {
            return;
        };

        let stale = existing
            .filter(|sermon| sermon.youtube_id.as_deref() != Some(video.video_id.as_str()))
            .map_or(false, |sermon| sermon.has_thumbnail(draft.thumbnail_url.as_deref()));

        if stale || draft.thumbnail_url.as_deref().map_or(true, is_blank) {
            draft.thumbnail_url = Some(video.thumbnail_url());
        }
        draft.youtube_id = Some(video.video_id);
    }

    fn materialize(
        id: Uuid,
        draft: SermonDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date.unwrap_or_default(),
            speaker: draft.speaker,
            description: draft.description,
            youtube_url: draft.youtube_url,
            youtube_id: draft.youtube_id,
            thumbnail_url: draft.thumbnail_url,
            featured: draft.featured,
            created_at,
            updated_at,
        }
    }
}
