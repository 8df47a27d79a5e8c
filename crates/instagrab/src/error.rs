// ABOUTME: Error types for the extraction pipeline including ErrorCode enum and ExtractError struct.
// ABOUTME: Provides categorized errors, convenience constructors, and the caller-facing message for each code.

use std::fmt;

/// Error codes representing the ways an extraction can terminate early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The input is not a supported Instagram post, reel, or story URL.
    InvalidUrl,
    /// Upstream answered 404: the post is gone or private.
    NotFound,
    /// Upstream answered 429.
    RateLimited,
    /// Any other transport or HTTP failure.
    Fetch,
    /// The caller cancelled the request while the page was being fetched.
    Cancelled,
}

impl ErrorCode {
    /// The HTTP status a web front end should answer with for this code.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::InvalidUrl => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::RateLimited => 429,
            ErrorCode::Fetch => 502,
            ErrorCode::Cancelled => 504,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::NotFound => "not found or private",
            ErrorCode::RateLimited => "rate limited upstream",
            ErrorCode::Fetch => "fetch failed",
            ErrorCode::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instagrab: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a NotFound error.
    pub fn not_found(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::NotFound, url, op, source)
    }

    /// Create a RateLimited error.
    pub fn rate_limited(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::RateLimited, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Cancelled error.
    pub fn cancelled(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Cancelled,
            url,
            op,
            Some(anyhow::anyhow!("request cancelled by caller")),
        )
    }

    /// Message shown to end users. Cancellation reads as an ordinary fetch failure.
    pub fn user_message(&self) -> &'static str {
        match self.code {
            ErrorCode::InvalidUrl => "Please provide a valid Instagram URL",
            ErrorCode::NotFound => {
                "Post not found. It may have been deleted or the account may be private."
            }
            ErrorCode::RateLimited => {
                "Instagram is temporarily limiting requests. Please try again in a few minutes."
            }
            ErrorCode::Fetch | ErrorCode::Cancelled => {
                "Failed to download content. Please try again later."
            }
        }
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is a RateLimited error.
    pub fn is_rate_limited(&self) -> bool {
        self.code == ErrorCode::RateLimited
    }

    /// Returns true for transport failures, including caller cancellation.
    pub fn is_fetch(&self) -> bool {
        matches!(self.code, ErrorCode::Fetch | ErrorCode::Cancelled)
    }

    /// Returns true if this is a Cancelled error.
    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::Cancelled
    }
}
