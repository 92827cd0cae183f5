//! pageswap page fetching
//!
//! - GET with a header marking the request as an in-app navigation
//! - Non-2xx statuses and transport failures are errors for the caller
//!   to fail open on
//! - Fragment extraction: container id first, `main` as fallback

mod document;
mod error;
mod fetcher;
mod source;

pub use document::{extract_fragment, Fragment, FragmentSource, ParsedDocument};
pub use error::FetchError;
pub use fetcher::PageFetcher;
pub use source::{FetchOptions, FetchedPage, HttpPageSource, PageSource};

pub type Result<T> = std::result::Result<T, FetchError>;
