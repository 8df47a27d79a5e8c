// ABOUTME: Shared field helpers for the extraction strategies.
// ABOUTME: Meta/attribute lookups, media URL resolution, caption cleanup, and timestamp parsing.

//! Field helpers shared by the strategies.
//!
//! Key behaviors:
//! - Selectors are tried in order; first non-empty match wins.
//! - Empty or whitespace-only values are treated as no match.
//! - Media URLs are always returned absolute (http or https).

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use url::Url;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trims a text value, returning `None` when nothing is left.
pub fn clean_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extracts an attribute value from the first matching selector that yields a non-empty result.
pub fn extract_first_attr(doc: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    for &sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for el in doc.select(&sel) {
            if let Some(value) = el.value().attr(attr).and_then(clean_text) {
                return Some(value);
            }
        }
    }
    None
}

/// Reads the `content` of a `<meta property=...>` tag, falling back to `<meta name=...>`.
pub fn meta_property(doc: &Html, property: &str) -> Option<String> {
    let by_property = format!("meta[property='{}']", property);
    let by_name = format!("meta[name='{}']", property);
    extract_first_attr(doc, &[by_property.as_str(), by_name.as_str()], "content")
}

/// Resolves a media reference against the page URL.
///
/// Returns `None` for empty values, `data:` URIs, and anything that does not
/// end up as an http(s) URL.
pub fn resolve_media_url(src: &str, base: &Url) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let resolved = base.join(src).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

/// Normalizes a caption: collapses inner whitespace runs per line and trims.
pub fn clean_caption(value: &str) -> Option<String> {
    let lines: Vec<String> = value
        .lines()
        .map(normalize_whitespace)
        .collect();
    clean_text(&lines.join("\n"))
}

/// Parse a timestamp, trying RFC3339 first then falling back to dateparser.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = dateparser::parse(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <meta property="og:image" content="  https://cdn.example.com/og.jpg  ">
            <meta name="og:title" content="Named title">
            <meta property="og:description" content="   ">
        </head>
        <body>
            <img src="/local.jpg" alt="Local Image">
        </body>
        </html>
    "#;

    fn parse_html() -> Html {
        Html::parse_document(SAMPLE_HTML)
    }

    fn base() -> Url {
        Url::parse("https://www.instagram.com/p/abc/").unwrap()
    }

    #[test]
    fn test_meta_property_trims_content() {
        let doc = parse_html();
        assert_eq!(
            meta_property(&doc, "og:image"),
            Some("https://cdn.example.com/og.jpg".to_string())
        );
    }

    #[test]
    fn test_meta_property_falls_back_to_name() {
        let doc = parse_html();
        assert_eq!(meta_property(&doc, "og:title"), Some("Named title".to_string()));
    }

    #[test]
    fn test_meta_property_blank_is_absent() {
        let doc = parse_html();
        assert!(meta_property(&doc, "og:description").is_none());
        assert!(meta_property(&doc, "og:video").is_none());
    }

    #[test]
    fn test_extract_first_attr_fallback() {
        let doc = parse_html();
        let result = extract_first_attr(&doc, &["video", "img"], "src");
        assert_eq!(result, Some("/local.jpg".to_string()));
    }

    #[test]
    fn test_resolve_media_url() {
        assert_eq!(
            resolve_media_url("/media/a.jpg", &base()),
            Some("https://www.instagram.com/media/a.jpg".to_string())
        );
        assert_eq!(
            resolve_media_url("//cdn.example.com/b.mp4", &base()),
            Some("https://cdn.example.com/b.mp4".to_string())
        );
        assert_eq!(
            resolve_media_url("https://cdn.example.com/c.jpg", &base()),
            Some("https://cdn.example.com/c.jpg".to_string())
        );
        assert_eq!(resolve_media_url("data:image/gif;base64,R0lG", &base()), None);
        assert_eq!(resolve_media_url("javascript:alert(1)", &base()), None);
        assert_eq!(resolve_media_url("   ", &base()), None);
    }

    #[test]
    fn test_clean_caption() {
        assert_eq!(
            clean_caption("  hello   world \n second\tline  "),
            Some("hello world\nsecond line".to_string())
        );
        assert_eq!(clean_caption(" \n "), None);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-06-15T12:00:00+00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date at all").is_none());
    }
}
