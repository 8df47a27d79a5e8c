// ABOUTME: Meta-tag strategy: reads OpenGraph properties from the document head.
// ABOUTME: og:image becomes an image, og:video(:secure_url) a video thumbnailed by og:image.

use scraper::Html;

use super::fields::{clean_caption, meta_property, parse_timestamp, resolve_media_url};
use super::{PageContext, PartialResult};
use crate::result::MediaItem;

/// Video properties in preference order.
const VIDEO_PROPERTIES: &[&str] = &["og:video:secure_url", "og:video", "og:video:url"];

/// Run the meta-tag strategy.
///
/// The username comes from the URL only for stories, since post and reel
/// paths start with `p`/`reel` rather than an account name.
pub fn extract(doc: &Html, ctx: &PageContext) -> PartialResult {
    let mut partial = PartialResult::default();

    let image = meta_property(doc, "og:image").and_then(|src| resolve_media_url(&src, &ctx.page_url));
    let video = VIDEO_PROPERTIES
        .iter()
        .filter_map(|p| meta_property(doc, p))
        .find_map(|src| resolve_media_url(&src, &ctx.page_url));

    if let Some(ref image) = image {
        partial.media.push(MediaItem::image(image.clone()));
    }
    if let Some(video) = video {
        partial.media.push(MediaItem::video(video, image));
    }

    partial.metadata.caption = ["og:title", "og:description"]
        .iter()
        .filter_map(|p| meta_property(doc, p))
        .find_map(|text| clean_caption(&text));
    partial.metadata.timestamp =
        meta_property(doc, "article:published_time").and_then(|t| parse_timestamp(&t));
    partial.metadata.username = ctx.url_username.clone();

    partial
}
