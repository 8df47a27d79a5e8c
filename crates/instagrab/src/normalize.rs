// ABOUTME: Merges the partial results of every strategy that ran into one ExtractionResult.
// ABOUTME: Media are deduplicated by URL in first-seen order; metadata is first-non-empty-wins.

use std::collections::HashSet;

use crate::extractors::{PageContext, PartialResult, Strategy};
use crate::result::ExtractionResult;

/// Merge strategy outputs, given in priority order.
///
/// The returned candidate may have no media; the caller decides whether to
/// fall back to placeholder content.
pub fn normalize(
    ctx: &PageContext,
    source_url: &str,
    attempts: &[(Strategy, PartialResult)],
) -> ExtractionResult {
    let mut result = ExtractionResult::new(ctx.kind, source_url);
    let mut seen = HashSet::new();

    for (strategy, partial) in attempts {
        for item in &partial.media {
            if seen.insert(item.url.as_str()) {
                result.media.push(item.clone());
            }
        }
        if result.strategy.is_none() && partial.has_media() {
            result.strategy = Some(*strategy);
        }
        result.metadata.fill_from(&partial.metadata);
    }

    result
}
