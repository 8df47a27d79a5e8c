// ABOUTME: URL classification for Instagram post, reel, and story links.
// ABOUTME: Validates the input URL and derives the ContentKind from its path without any network access.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Scheme and host are case-insensitive; the path prefix is not.
static INSTAGRAM_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?://(?:www\.)?instagram\.com)/(p|reel|stories)/([^/?#&]+)").unwrap()
});

/// The kind of content a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Reel,
    Story,
    #[default]
    Unknown,
}

impl ContentKind {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "p" => ContentKind::Post,
            "reel" => ContentKind::Reel,
            "stories" => ContentKind::Story,
            _ => ContentKind::Unknown,
        }
    }

    /// Loose detection by path marker, used when the URL did not validate.
    pub fn from_url(url: &str) -> Self {
        if url.contains("/p/") {
            ContentKind::Post
        } else if url.contains("/reel/") {
            ContentKind::Reel
        } else if url.contains("/stories/") {
            ContentKind::Story
        } else {
            ContentKind::Unknown
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Post => "post",
            ContentKind::Reel => "reel",
            ContentKind::Story => "story",
            ContentKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Result of classifying a raw URL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ContentKind,
    pub is_valid: bool,
    /// The path segment after the kind prefix: a shortcode for posts and
    /// reels, the account name for stories.
    pub segment: Option<String>,
}

impl Classification {
    /// Account name embedded in a story URL.
    pub fn story_owner(&self) -> Option<&str> {
        match self.kind {
            ContentKind::Story => self.segment.as_deref(),
            _ => None,
        }
    }
}

/// Classify a raw URL string.
///
/// Valid URLs use http(s), point at `instagram.com` or `www.instagram.com`,
/// and have a path starting with `/p/`, `/reel/`, or `/stories/` followed by
/// a non-empty segment. Invalid input still gets a best-effort kind.
pub fn classify(raw: &str) -> Classification {
    let trimmed = raw.trim();
    match INSTAGRAM_URL_RE.captures(trimmed) {
        Some(caps) => Classification {
            kind: ContentKind::from_prefix(&caps[1]),
            is_valid: true,
            segment: Some(caps[2].to_string()),
        },
        None => Classification {
            kind: ContentKind::from_url(trimmed),
            is_valid: false,
            segment: None,
        },
    }
}

/// The URL to fetch: the input with query string and fragment removed.
pub fn fetch_url(raw: &str) -> &str {
    let trimmed = raw.trim();
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_valid_urls() {
        let post = classify("https://www.instagram.com/p/CxYz123/");
        assert!(post.is_valid);
        assert_eq!(post.kind, ContentKind::Post);
        assert_eq!(post.segment.as_deref(), Some("CxYz123"));

        let reel = classify("http://instagram.com/reel/AbC_-9?igsh=xyz");
        assert!(reel.is_valid);
        assert_eq!(reel.kind, ContentKind::Reel);
        assert_eq!(reel.segment.as_deref(), Some("AbC_-9"));

        let story = classify("https://instagram.com/stories/some.user/3141592653");
        assert!(story.is_valid);
        assert_eq!(story.kind, ContentKind::Story);
        assert_eq!(story.story_owner(), Some("some.user"));
    }

    #[test]
    fn test_classify_is_case_insensitive_on_scheme_and_host() {
        let c = classify("HTTPS://WWW.Instagram.COM/p/abc");
        assert!(c.is_valid);
        assert_eq!(c.kind, ContentKind::Post);
    }

    #[test]
    fn test_classify_rejects_invalid_urls() {
        for url in [
            "",
            "not a url",
            "ftp://instagram.com/p/abc",
            "https://example.com/p/abc",
            "https://instagram.com.evil.net/p/abc",
            "https://m.instagram.com/p/abc",
            "https://instagram.com/p/",
            "https://instagram.com/p/?x=1",
            "https://instagram.com/p//abc",
            "https://instagram.com/tv/abc",
            "https://instagram.com/someone",
        ] {
            let c = classify(url);
            assert!(!c.is_valid, "expected {url:?} to be rejected");
            assert!(c.segment.is_none());
        }
    }

    #[test]
    fn test_invalid_url_keeps_loose_kind() {
        let c = classify("https://example.com/reel/abc");
        assert!(!c.is_valid);
        assert_eq!(c.kind, ContentKind::Reel);
    }

    #[test]
    fn test_story_owner_only_for_stories() {
        assert_eq!(classify("https://instagram.com/p/abc").story_owner(), None);
    }

    #[test]
    fn test_fetch_url_strips_query_and_fragment() {
        assert_eq!(
            fetch_url("https://www.instagram.com/p/abc/?utm_source=ig_web_copy_link"),
            "https://www.instagram.com/p/abc/"
        );
        assert_eq!(
            fetch_url(" https://instagram.com/reel/abc#frag "),
            "https://instagram.com/reel/abc"
        );
        assert_eq!(
            fetch_url("https://instagram.com/p/abc"),
            "https://instagram.com/p/abc"
        );
    }

    #[test]
    fn test_content_kind_display() {
        assert_eq!(ContentKind::Story.to_string(), "story");
        assert_eq!(ContentKind::Unknown.to_string(), "unknown");
    }
}
