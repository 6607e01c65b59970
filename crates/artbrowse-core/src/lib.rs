use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod api;
pub mod browser;
pub mod pager;
pub mod selection;

// Re-export for convenience
pub use api::{ArticCollection, CollectionSource};
pub use browser::{Browser, FetchRequest, PageOutcome};
pub use pager::{PAGE_SIZE, Pager};
pub use selection::{Accumulation, PendingCount, SelectionSet, accumulate, parse_count};

/// Default collection endpoint (Art Institute of Chicago artworks).
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// Stable identifier of a [`Record`].
pub type RecordId = u64;

/// One item of the remote collection, displayed as a table row.
///
/// Text fields are optional because the API returns `null` for many of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Record {
    /// A record with only an id, used by tests and mocks.
    pub fn with_id(id: RecordId) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn title_or_untitled(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// One fetched batch of records plus the collection's total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number this batch was fetched for.
    pub number: u32,
    pub records: Vec<Record>,
    /// Total number of records in the whole remote collection.
    pub total: u64,
}

/// A page fetch that failed (transport, HTTP status, or body decoding).
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection settings for the collection API.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("artbrowse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Build the HTTP client shared by every fetch.
    pub fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }

    /// The collection source these settings point at.
    pub fn source(&self) -> ArticCollection {
        ArticCollection::new(self.endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_with_null_fields() {
        let json = r#"{
            "id": 27992,
            "title": "A Sunday on La Grande Jatte",
            "place_of_origin": "France",
            "artist_display": "Georges Seurat\nFrench, 1859-1891",
            "inscriptions": null,
            "date_start": 1884,
            "date_end": 1886
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 27992);
        assert_eq!(record.inscriptions, None);
        assert_eq!(record.date_start, Some(1884));
        assert_eq!(record.title_or_untitled(), "A Sunday on La Grande Jatte");
    }

    #[test]
    fn record_decodes_with_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(record, Record::with_id(5));
        assert_eq!(record.title_or_untitled(), "Untitled");
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = serde_json::from_str::<Record>(r#"{"title": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn default_config_points_at_artic() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("artbrowse/"));
    }
}
