use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

use super::CollectionSource;
use crate::{FetchError, Page, Record};

/// Wire shape of a page response: `{ pagination: { total }, data: [...] }`.
#[derive(Debug, Deserialize)]
struct PageResponse {
    pagination: Pagination,
    data: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: u64,
}

/// Paginated collection endpoint in the style of the Art Institute of Chicago API.
pub struct ArticCollection {
    pub endpoint: String,
}

impl ArticCollection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl CollectionSource for ArticCollection {
    fn name(&self) -> &str {
        "Art Institute of Chicago"
    }

    fn fetch_page<'a>(
        &'a self,
        page: u32,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Page, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            tracing::debug!(endpoint = %self.endpoint, page, "fetching page");
            let resp = client
                .get(&self.endpoint)
                .query(&[("page", page)])
                .timeout(timeout)
                .send()
                .await?;
            decode_page(page, resp).await
        })
    }
}

/// Turn an HTTP response into a [`Page`]. Non-2xx statuses are errors.
pub(crate) async fn decode_page(page: u32, resp: reqwest::Response) -> Result<Page, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let body = resp.bytes().await?;
    let wire: PageResponse = serde_json::from_slice(&body)?;
    Ok(Page {
        number: page,
        records: wire.data,
        total: wire.pagination.total,
    })
}
