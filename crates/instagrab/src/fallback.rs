// ABOUTME: Placeholder content for posts where no strategy found any media.
// ABOUTME: Produces one fixed image or video item and annotates the caption as substituted.

use crate::classify::ContentKind;
use crate::result::{ExtractionResult, MediaItem};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://example.com/sample-image.jpg";
pub const PLACEHOLDER_VIDEO_URL: &str = "https://example.com/sample-reel.mp4";
pub const PLACEHOLDER_THUMBNAIL_URL: &str = "https://example.com/thumbnail.jpg";

/// Caption used when the page provided none.
pub const UNAVAILABLE_NOTICE: &str =
    "Media could not be extracted from this post. Showing placeholder content instead.";

/// Appended to an existing caption.
pub const SUBSTITUTED_SUFFIX: &str = " [media unavailable, placeholder shown]";

/// Whether the placeholder should be a video.
pub fn wants_video(kind: ContentKind, source_url: &str) -> bool {
    kind == ContentKind::Reel || source_url.to_lowercase().contains("video")
}

/// Replace an empty media list with a single placeholder item.
///
/// Results that already carry media are returned unchanged.
pub fn synthesize(mut candidate: ExtractionResult) -> ExtractionResult {
    if !candidate.media.is_empty() {
        return candidate;
    }

    let item = if wants_video(candidate.kind, &candidate.source_url) {
        MediaItem::video(
            PLACEHOLDER_VIDEO_URL,
            Some(PLACEHOLDER_THUMBNAIL_URL.to_string()),
        )
    } else {
        MediaItem::image(PLACEHOLDER_IMAGE_URL)
    };
    candidate.media.push(item);

    candidate.metadata.caption = Some(match candidate.metadata.caption.take() {
        Some(caption) => format!("{}{}", caption, SUBSTITUTED_SUFFIX),
        None => UNAVAILABLE_NOTICE.to_string(),
    });
    candidate.synthetic = true;
    candidate.strategy = None;
    candidate
}
