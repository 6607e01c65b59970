//! In-memory collection source for tests.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::CollectionSource;
use crate::{FetchError, PAGE_SIZE, Page, Record};

/// A hand-rolled mock implementing [`CollectionSource`] for tests.
///
/// Serves [`PAGE_SIZE`] slices of a fixed record list. Supports:
/// - Pages that fail with an HTTP 500.
/// - Optional per-call latency.
/// - Call counting via [`call_count()`](MockCollection::call_count).
pub struct MockCollection {
    records: Vec<Record>,
    failing_pages: HashSet<u32>,
    delay: Option<Duration>,
    call_count: AtomicUsize,
}

impl MockCollection {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            failing_pages: HashSet::new(),
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// A collection of `total` bare records with ids `1..=total`.
    pub fn with_total(total: u64) -> Self {
        Self::new((1..=total).map(Record::with_id).collect())
    }

    /// Make fetches of `page` fail.
    pub fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `fetch_page()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The page the server would return, without counting a call.
    pub fn page(&self, page: u32) -> Page {
        let start = (page.max(1) as usize - 1).saturating_mul(PAGE_SIZE);
        let records = self
            .records
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        Page {
            number: page,
            records,
            total: self.records.len() as u64,
        }
    }
}

impl CollectionSource for MockCollection {
    fn name(&self) -> &str {
        "Mock"
    }

    fn fetch_page<'a>(
        &'a self,
        page: u32,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Page, FetchError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay;
        let fails = self.failing_pages.contains(&page);

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            if fails {
                return Err(FetchError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            Ok(self.page(page))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_pages() {
        let mock = MockCollection::with_total(30);
        let ids: Vec<_> = mock.page(3).records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (25..=30).collect::<Vec<_>>());
        assert_eq!(mock.page(3).total, 30);
        assert!(mock.page(4).records.is_empty());
    }

    #[tokio::test]
    async fn counts_calls_and_fails_on_request() {
        let mock = MockCollection::with_total(24).failing_on(2);
        let client = reqwest::Client::new();
        let timeout = Duration::from_secs(1);

        let page = mock.fetch_page(1, &client, timeout).await.unwrap();
        assert_eq!(page.records.len(), PAGE_SIZE);
        assert!(mock.fetch_page(2, &client, timeout).await.is_err());
        assert_eq!(mock.call_count(), 2);
    }
}
