// ABOUTME: The Client that orchestrates one extraction: classify, fetch, run strategies, normalize, fall back.
// ABOUTME: Provides async extract()/extract_with_cancel() and a fetch-free extract_html() for markup already in hand.

use scraper::Html;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::classify::{classify, fetch_url, Classification};
use crate::error::ExtractError;
use crate::extractors::{run_strategies, PageContext};
use crate::fallback::synthesize;
use crate::normalize::normalize;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions};
use crate::result::ExtractionResult;

/// Extraction client. Holds the immutable network configuration shared by
/// every request; no per-request state is kept.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// Extract media and metadata from an Instagram URL.
    ///
    /// Invalid URLs fail before any network access. A page with no
    /// extractable media still succeeds, with placeholder content flagged via
    /// [`ExtractionResult::synthetic`].
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        self.extract_with_cancel(url, CancellationToken::new()).await
    }

    /// Like [`Client::extract`], but aborts the page fetch when `cancel` fires.
    pub async fn extract_with_cancel(
        &self,
        url: &str,
        cancel: CancellationToken,
    ) -> Result<ExtractionResult, ExtractError> {
        let classification = validate(url)?;
        let page_url = page_url(url)?;
        let target = self.fetch_target(&page_url);

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(url = %url, "extraction cancelled during fetch");
                return Err(ExtractError::cancelled(url, "Fetch"));
            }
            res = fetch(&self.http_client, target.as_str(), &fetch_opts) => res?,
        };

        if fetched.final_url != target.as_str() {
            debug!(url = %url, final_url = %fetched.final_url, "page fetch was redirected");
        }

        let markup = fetched.text();
        Ok(extract_markup(&markup, url, page_url, &classification))
    }

    /// Run the extraction strategies on markup the caller already has.
    pub fn extract_html(&self, html: &str, url: &str) -> Result<ExtractionResult, ExtractError> {
        let classification = validate(url)?;
        let page_url = page_url(url)?;
        Ok(extract_markup(html, url, page_url, &classification))
    }

    /// The URL actually requested: the page URL, moved onto the configured
    /// upstream origin when one is set.
    fn fetch_target(&self, page_url: &Url) -> Url {
        match &self.opts.upstream_origin {
            Some(origin) => {
                let mut target = origin.clone();
                target.set_path(page_url.path());
                target.set_query(None);
                target.set_fragment(None);
                target
            }
            None => page_url.clone(),
        }
    }
}

fn validate(url: &str) -> Result<Classification, ExtractError> {
    let classification = classify(url);
    if !classification.is_valid {
        warn!(url = %url, "rejected URL");
        return Err(ExtractError::invalid_url(
            url,
            "Classify",
            Some(anyhow::anyhow!("not an Instagram post, reel, or story URL")),
        ));
    }
    Ok(classification)
}

fn page_url(url: &str) -> Result<Url, ExtractError> {
    Url::parse(fetch_url(url)).map_err(|e| {
        ExtractError::invalid_url(url, "Classify", Some(anyhow::anyhow!("malformed URL: {}", e)))
    })
}

/// Strategies, normalization, and fallback over one page. Never fails.
fn extract_markup(
    markup: &str,
    source_url: &str,
    page_url: Url,
    classification: &Classification,
) -> ExtractionResult {
    let ctx = PageContext::new(page_url, classification);
    let doc = Html::parse_document(markup);
    let attempts = run_strategies(&doc, &ctx);
    let candidate = normalize(&ctx, source_url.trim(), &attempts);

    if candidate.media.is_empty() {
        warn!(
            url = %source_url,
            kind = %ctx.kind,
            strategies = attempts.len(),
            "no media extracted, substituting placeholder"
        );
        return synthesize(candidate);
    }

    info!(
        url = %source_url,
        kind = %ctx.kind,
        media = candidate.media.len(),
        video = candidate.has_video(),
        strategy = ?candidate.strategy,
        "extraction complete"
    );
    candidate
}
