// ABOUTME: Extraction strategies for Instagram post pages and the order they run in.
// ABOUTME: Each strategy is a plain function from a parsed page to a PartialResult.

//! Extraction strategies.
//!
//! Strategies run in priority order and stop at the first one that yields
//! media. Every strategy that ran contributes its metadata to normalization.
//!
//! Submodules:
//! - `linked_data`: embedded JSON-LD blocks.
//! - `meta_tags`: OpenGraph meta tags.
//! - `markup`: raw `img[srcset]` and `<video>` scanning.
//! - `fields`: shared lookup helpers.

pub mod fields;
pub mod linked_data;
pub mod markup;
pub mod meta_tags;

use std::fmt;

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::classify::{Classification, ContentKind};
use crate::result::{MediaItem, PostMetadata};

/// What one strategy found. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialResult {
    pub media: Vec<MediaItem>,
    pub metadata: PostMetadata,
}

impl PartialResult {
    pub fn is_empty(&self) -> bool {
        self.media.is_empty() && self.metadata.is_empty()
    }

    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

/// Per-request inputs every strategy can read.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub kind: ContentKind,
    /// The page URL with query and fragment removed; relative media resolve against it.
    pub page_url: Url,
    /// Account name taken from the URL itself (stories only).
    pub url_username: Option<String>,
}

impl PageContext {
    pub fn new(page_url: Url, classification: &Classification) -> Self {
        Self {
            kind: classification.kind,
            page_url,
            url_username: classification.story_owner().map(str::to_string),
        }
    }
}

/// The extraction strategies, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    LinkedData,
    MetaTags,
    RawMarkup,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [Strategy::LinkedData, Strategy::MetaTags, Strategy::RawMarkup];

    /// Run this strategy against a parsed page.
    pub fn run(&self, doc: &Html, ctx: &PageContext) -> PartialResult {
        match self {
            Strategy::LinkedData => linked_data::extract(doc, ctx),
            Strategy::MetaTags => meta_tags::extract(doc, ctx),
            Strategy::RawMarkup => markup::extract(doc, ctx),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::LinkedData => "linked-data",
            Strategy::MetaTags => "meta-tags",
            Strategy::RawMarkup => "raw-markup",
        };
        write!(f, "{}", s)
    }
}

/// Run strategies in order until one yields media.
///
/// Returns the output of every strategy that ran, in the order they ran.
pub fn run_strategies(doc: &Html, ctx: &PageContext) -> Vec<(Strategy, PartialResult)> {
    let mut attempts = Vec::with_capacity(Strategy::ORDER.len());
    for strategy in Strategy::ORDER {
        let partial = strategy.run(doc, ctx);
        debug!(
            strategy = %strategy,
            media = partial.media.len(),
            has_metadata = !partial.metadata.is_empty(),
            "strategy finished"
        );
        let done = partial.has_media();
        attempts.push((strategy, partial));
        if done {
            break;
        }
    }
    attempts
}
