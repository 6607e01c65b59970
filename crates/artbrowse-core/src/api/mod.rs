//! Collection source trait and implementations for fetching record pages.

pub mod artic;
pub mod mock;

pub use artic::ArticCollection;

use std::future::Future;
use std::pin::Pin;

use crate::{FetchError, Page};

/// A remote (or in-memory) collection that serves fixed-size pages of records.
pub trait CollectionSource: Send + Sync {
    /// Short display name of this source (e.g., "Art Institute of Chicago").
    fn name(&self) -> &str;

    /// Fetch the 1-based page `page`.
    fn fetch_page<'a>(
        &'a self,
        page: u32,
        client: &'a reqwest::Client,
        timeout: std::time::Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Page, FetchError>> + Send + 'a>>;
}
