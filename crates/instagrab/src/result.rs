// ABOUTME: ExtractionResult and its parts: MediaItem, MediaKind, and PostMetadata.
// ABOUTME: Serializes to the JSON data shape consumed by download front ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::ContentKind;
use crate::extractors::Strategy;

/// Whether a media resource is a still image or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One downloadable media resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Absolute URL of the resource; unique within a result.
    pub url: String,
    #[serde(rename = "thumbnail", skip_serializing_if = "Option::is_none", default)]
    pub thumbnail_url: Option<String>,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            thumbnail_url: None,
        }
    }

    pub fn video(url: impl Into<String>, thumbnail_url: Option<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            thumbnail_url,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Caption and author information for a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PostMetadata {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.caption.is_none() && self.timestamp.is_none()
    }

    /// Fill every unset field from `other`. Fields already set are kept.
    pub fn fill_from(&mut self, other: &PostMetadata) {
        if self.username.is_none() {
            self.username = other.username.clone();
        }
        if self.caption.is_none() {
            self.caption = other.caption.clone();
        }
        if self.timestamp.is_none() {
            self.timestamp = other.timestamp;
        }
    }
}

/// The outcome of one extraction: media plus post metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// The URL the caller asked for.
    #[serde(rename = "url")]
    pub source_url: String,
    pub media: Vec<MediaItem>,
    pub metadata: PostMetadata,
    /// Set when the media list is placeholder content rather than real extraction.
    #[serde(skip)]
    pub synthetic: bool,
    /// The strategy that produced the media, if any did.
    #[serde(skip)]
    pub strategy: Option<Strategy>,
}

impl ExtractionResult {
    pub fn new(kind: ContentKind, source_url: impl Into<String>) -> Self {
        Self {
            kind,
            source_url: source_url.into(),
            media: Vec::new(),
            metadata: PostMetadata::default(),
            synthetic: false,
            strategy: None,
        }
    }

    /// Returns true if at least one video is present.
    pub fn has_video(&self) -> bool {
        self.media.iter().any(MediaItem::is_video)
    }

    /// Returns true if the result carries real media from the page.
    pub fn is_real(&self) -> bool {
        !self.synthetic && !self.media.is_empty()
    }
}
