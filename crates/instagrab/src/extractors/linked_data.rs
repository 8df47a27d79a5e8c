// ABOUTME: Linked-data strategy: reads embedded application/ld+json blocks.
// ABOUTME: Pulls author, caption, upload date, images, and videos from schema.org-style payloads.

//! Linked-data strategy.
//!
//! Blocks are folded in document order. A block that fails to parse is logged
//! and skipped. Metadata accumulates first-wins across blocks; the first block
//! that yields media ends the fold, and later blocks are not read.
//!
//! Fields read from each schema.org node (including `@graph` members):
//! - `author.identifier` (string, or object with `value`), else `author.alternateName` -> username
//! - `caption`, else `articleBody` -> caption
//! - `uploadDate`, `dateCreated`, `datePublished` -> timestamp
//! - `image`: string, object with `url`/`contentUrl`, or a list of either -> images
//! - `video`: object or list of objects with `contentUrl` (and optional `thumbnailUrl`) -> videos

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::warn;

use super::fields::{clean_caption, clean_text, parse_timestamp, resolve_media_url};
use super::{PageContext, PartialResult};
use crate::result::MediaItem;

const TIMESTAMP_KEYS: &[&str] = &["uploadDate", "dateCreated", "datePublished"];

/// Run the linked-data strategy.
pub fn extract(doc: &Html, ctx: &PageContext) -> PartialResult {
    let selector = match Selector::parse("script[type='application/ld+json']") {
        Ok(s) => s,
        Err(_) => return PartialResult::default(),
    };

    let mut folded = PartialResult::default();
    for (index, script) in doc.select(&selector).enumerate() {
        let text = script.text().collect::<String>();
        if text.trim().is_empty() {
            continue;
        }

        let value = match serde_json::from_str::<Value>(&text) {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    url = %ctx.page_url,
                    block = index,
                    error = %e,
                    "skipping malformed linked-data block"
                );
                continue;
            }
        };

        let partial = extract_value(&value, ctx);
        folded.metadata.fill_from(&partial.metadata);
        if partial.has_media() {
            folded.media = partial.media;
            break;
        }
    }

    folded
}

/// Extract post data from one parsed block.
pub fn extract_value(value: &Value, ctx: &PageContext) -> PartialResult {
    let mut nodes = Vec::new();
    collect_nodes(value, &mut nodes);

    let mut partial = PartialResult::default();
    for node in nodes {
        read_node(node, ctx, &mut partial);
    }
    partial
}

/// Flatten top-level arrays and `@graph` containers into a list of objects.
fn collect_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    match value {
        Value::Object(map) => {
            out.push(map);
            if let Some(graph) = map.get("@graph") {
                collect_nodes(graph, out);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_nodes(v, out);
            }
        }
        _ => {}
    }
}

fn read_node(node: &Map<String, Value>, ctx: &PageContext, partial: &mut PartialResult) {
    let meta = &mut partial.metadata;

    if meta.username.is_none() {
        meta.username = node.get("author").and_then(author_username);
    }

    if meta.caption.is_none() {
        meta.caption = ["caption", "articleBody"]
            .iter()
            .filter_map(|key| node.get(*key).and_then(Value::as_str))
            .find_map(clean_caption);
    }

    if meta.timestamp.is_none() {
        meta.timestamp = TIMESTAMP_KEYS
            .iter()
            .filter_map(|key| node.get(*key).and_then(Value::as_str))
            .find_map(parse_timestamp);
    }

    if let Some(image) = node.get("image") {
        for src in image_sources(image) {
            if let Some(url) = resolve_media_url(src, &ctx.page_url) {
                partial.media.push(MediaItem::image(url));
            }
        }
    }

    if let Some(video) = node.get("video") {
        for obj in objects(video) {
            let Some(src) = obj.get("contentUrl").and_then(Value::as_str) else {
                continue;
            };
            let Some(url) = resolve_media_url(src, &ctx.page_url) else {
                continue;
            };
            let thumbnail = obj
                .get("thumbnailUrl")
                .and_then(first_string)
                .and_then(|t| resolve_media_url(t, &ctx.page_url));
            partial.media.push(MediaItem::video(url, thumbnail));
        }
    }
}

/// Username from an `author` value: identifier first, then alternate name.
fn author_username(author: &Value) -> Option<String> {
    let author = objects(author).into_iter().next()?;

    let identifier = match author.get("identifier") {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Object(obj)) => obj.get("value").and_then(Value::as_str).and_then(clean_text),
        _ => None,
    };

    identifier.or_else(|| {
        author
            .get("alternateName")
            .and_then(Value::as_str)
            .and_then(|name| clean_text(name.trim().trim_start_matches('@')))
    })
}

/// Image references from a string, an object, or a list of either.
fn image_sources(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Object(obj) => ["url", "contentUrl"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .into_iter()
            .collect(),
        Value::Array(arr) => arr.iter().flat_map(image_sources).collect(),
        _ => Vec::new(),
    }
}

/// The object itself, or every object in a list.
fn objects(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Object(obj) => vec![obj],
        Value::Array(arr) => arr.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(arr) => arr.iter().find_map(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::result::MediaKind;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use url::Url;

    const PAGE: &str = "https://www.instagram.com/p/abc/";

    fn ctx() -> PageContext {
        PageContext::new(Url::parse(PAGE).unwrap(), &classify(PAGE))
    }

    fn run(html: &str) -> PartialResult {
        extract(&Html::parse_document(html), &ctx())
    }

    fn ld(json: &str) -> String {
        format!(
            r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
            json
        )
    }

    #[test]
    fn test_single_image_with_caption_and_author() {
        let partial = run(&ld(r#"{
            "@context": "https://schema.org",
            "@type": "SocialMediaPosting",
            "author": {
                "@type": "Person",
                "identifier": {"@type": "PropertyValue", "propertyID": "Username", "value": "natgeo"},
                "alternateName": "@natgeo_display"
            },
            "caption": "Sunrise over the dunes",
            "uploadDate": "2024-03-01T08:30:00+00:00",
            "image": "https://cdn.example.com/photo.jpg"
        }"#));

        assert_eq!(partial.media, vec![MediaItem::image("https://cdn.example.com/photo.jpg")]);
        assert_eq!(partial.metadata.username.as_deref(), Some("natgeo"));
        assert_eq!(partial.metadata.caption.as_deref(), Some("Sunrise over the dunes"));
        assert_eq!(
            partial.metadata.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_username_falls_back_to_alternate_name() {
        let partial = run(&ld(r#"{"author": {"alternateName": "@someone"}, "image": "https://a.example/x.jpg"}"#));
        assert_eq!(partial.metadata.username.as_deref(), Some("someone"));
    }

    #[test]
    fn test_string_identifier() {
        let partial = run(&ld(r#"{"author": [{"identifier": "plain_id"}]}"#));
        assert_eq!(partial.metadata.username.as_deref(), Some("plain_id"));
    }

    #[test]
    fn test_image_shapes() {
        let partial = run(&ld(r#"{"image": [
            "https://cdn.example.com/1.jpg",
            {"url": "https://cdn.example.com/2.jpg"},
            {"@type": "ImageObject", "contentUrl": "/relative/3.jpg"},
            {"width": 10}
        ]}"#));

        let urls: Vec<&str> = partial.media.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/1.jpg",
                "https://cdn.example.com/2.jpg",
                "https://www.instagram.com/relative/3.jpg",
            ]
        );
        assert!(partial.media.iter().all(|m| m.kind == MediaKind::Image));
    }

    #[test]
    fn test_video_objects() {
        let partial = run(&ld(r#"{"video": [
            {"contentUrl": "https://cdn.example.com/v1.mp4", "thumbnailUrl": "https://cdn.example.com/t1.jpg"},
            {"contentUrl": "https://cdn.example.com/v2.mp4", "thumbnailUrl": ["https://cdn.example.com/t2.jpg"]},
            {"thumbnailUrl": "https://cdn.example.com/orphan.jpg"}
        ]}"#));

        assert_eq!(
            partial.media,
            vec![
                MediaItem::video(
                    "https://cdn.example.com/v1.mp4",
                    Some("https://cdn.example.com/t1.jpg".to_string())
                ),
                MediaItem::video(
                    "https://cdn.example.com/v2.mp4",
                    Some("https://cdn.example.com/t2.jpg".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_single_video_object_without_thumbnail() {
        let partial = run(&ld(r#"{"video": {"contentUrl": "https://cdn.example.com/v.mp4"}}"#));
        assert_eq!(partial.media, vec![MediaItem::video("https://cdn.example.com/v.mp4", None)]);
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"image": "https://cdn.example.com/broken.jpg",</script>
            <script type="application/ld+json">{"image": "https://cdn.example.com/good.jpg"}</script>
        </head></html>"#;
        let partial = run(html);
        assert_eq!(partial.media, vec![MediaItem::image("https://cdn.example.com/good.jpg")]);
    }

    #[test]
    fn test_first_block_with_media_ends_fold() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "BreadcrumbList"}</script>
            <script type="application/ld+json">{"caption": "first"}</script>
            <script type="application/ld+json">{"caption": "second", "image": "https://cdn.example.com/x.jpg"}</script>
            <script type="application/ld+json">{"author": {"identifier": "late"}, "image": "https://cdn.example.com/y.jpg"}</script>
        </head></html>"#;
        let partial = run(html);
        assert_eq!(partial.metadata.caption.as_deref(), Some("first"));
        assert_eq!(partial.metadata.username, None);
        assert_eq!(partial.media, vec![MediaItem::image("https://cdn.example.com/x.jpg")]);
    }

    #[test]
    fn test_metadata_only_block_does_not_hide_later_media() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"author": {"identifier": "acct"}}</script>
            <script type="application/ld+json">{"image": "https://cdn.example.com/real.jpg"}</script>
        </head></html>"#;
        let partial = run(html);
        assert_eq!(partial.metadata.username.as_deref(), Some("acct"));
        assert_eq!(partial.media, vec![MediaItem::image("https://cdn.example.com/real.jpg")]);
    }

    #[test]
    fn test_metadata_without_media_is_kept() {
        let partial = run(&ld(r#"{"caption": "words only", "uploadDate": "2024-03-01T08:30:00Z"}"#));
        assert!(partial.media.is_empty());
        assert_eq!(partial.metadata.caption.as_deref(), Some("words only"));
        assert!(partial.metadata.timestamp.is_some());
    }

    #[test]
    fn test_graph_container() {
        let partial = run(&ld(r#"{"@context": "https://schema.org", "@graph": [
            {"@type": "WebPage"},
            {"@type": "SocialMediaPosting", "articleBody": "from graph", "image": {"url": "https://cdn.example.com/g.jpg"}}
        ]}"#));
        assert_eq!(partial.metadata.caption.as_deref(), Some("from graph"));
        assert_eq!(partial.media, vec![MediaItem::image("https://cdn.example.com/g.jpg")]);
    }

    #[test]
    fn test_no_blocks() {
        let partial = run("<html><body><p>plain</p></body></html>");
        assert!(partial.is_empty());
    }
}
