// ABOUTME: Raw-markup strategy: scans img srcset attributes and video sources in the page body.
// ABOUTME: Picks the highest-resolution srcset candidate and deduplicates within the pass.

use std::collections::HashSet;

use scraper::{Html, Selector};

use super::fields::resolve_media_url;
use super::{PageContext, PartialResult};
use crate::result::MediaItem;

/// The highest-resolution candidate of a `srcset` attribute: the URL part
/// of the last comma-separated entry.
pub fn best_srcset_candidate(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .last()
        .and_then(|entry| entry.split_whitespace().next())
}

/// Run the raw-markup strategy.
pub fn extract(doc: &Html, ctx: &PageContext) -> PartialResult {
    let mut partial = PartialResult::default();
    let mut seen = HashSet::new();

    let mut push = |item: MediaItem, media: &mut Vec<MediaItem>| {
        if seen.insert(item.url.clone()) {
            media.push(item);
        }
    };

    if let Ok(img_sel) = Selector::parse("img[srcset]") {
        for img in doc.select(&img_sel) {
            let url = img
                .value()
                .attr("srcset")
                .and_then(best_srcset_candidate)
                .and_then(|src| resolve_media_url(src, &ctx.page_url));
            if let Some(url) = url {
                push(MediaItem::image(url), &mut partial.media);
            }
        }
    }

    let (Ok(video_sel), Ok(source_sel)) = (Selector::parse("video"), Selector::parse("source[src]"))
    else {
        return partial;
    };

    for video in doc.select(&video_sel) {
        let poster = video
            .value()
            .attr("poster")
            .and_then(|p| resolve_media_url(p, &ctx.page_url));

        let direct = video.value().attr("src");
        let nested = video.select(&source_sel).filter_map(|s| s.value().attr("src"));

        for src in direct.into_iter().chain(nested) {
            if let Some(url) = resolve_media_url(src, &ctx.page_url) {
                push(MediaItem::video(url, poster.clone()), &mut partial.media);
            }
        }
    }

    partial
}
