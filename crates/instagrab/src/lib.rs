// ABOUTME: Main library entry point for the Instagram media extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, ExtractionResult, ExtractError, ErrorCode, ApiResponse.

//! instagrab - extracts downloadable media and caption metadata from public
//! Instagram post, reel, and story pages.
//!
//! A URL is classified, the page is fetched once, and three extraction
//! strategies (JSON-LD, OpenGraph meta tags, raw markup) run in priority
//! order. When none finds media, a flagged placeholder result is returned.
//!
//! # Example
//!
//! ```no_run
//! use instagrab::{Client, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build();
//!     let result = client.extract("https://www.instagram.com/p/CxYz123/").await?;
//!     for item in &result.media {
//!         println!("{:?} {}", item.kind, item.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod extractors;
pub mod fallback;
pub mod normalize;
pub mod options;
pub mod resource;
pub mod response;
pub mod result;

pub use crate::classify::{classify, Classification, ContentKind};
pub use crate::client::Client;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::Strategy;
pub use crate::options::{ClientBuilder, Options};
pub use crate::response::ApiResponse;
pub use crate::result::{ExtractionResult, MediaItem, MediaKind, PostMetadata};
pub use tokio_util::sync::CancellationToken;
