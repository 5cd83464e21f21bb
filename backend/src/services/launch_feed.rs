//! External launch schedule feed.
//!
//! The feed is fetched in full on every conflict check; nothing is cached.

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::models::ExternalLaunchRecord;

/// Public SpaceX launches endpoint.
pub const DEFAULT_FEED_URL: &str = "https://api.spacexdata.com/v4/launches";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("launch feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("launch feed answered with status {0}")]
    Status(StatusCode),

    #[error("launch feed returned an undecodable body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("launch feed unavailable: {0}")]
    Unavailable(String),
}

/// Source of scheduled launches.
#[async_trait]
pub trait LaunchFeed: Send + Sync {
    async fn fetch_launches(&self) -> Result<Vec<ExternalLaunchRecord>, FeedError>;
}

/// Feed fetched over HTTP as a JSON array of launch records.
#[derive(Debug, Clone)]
pub struct HttpLaunchFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpLaunchFeed {
    /// Build a client for `url`. `timeout` bounds each whole request.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LaunchFeed for HttpLaunchFeed {
    async fn fetch_launches(&self) -> Result<Vec<ExternalLaunchRecord>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.bytes().await?;
        let records: Vec<ExternalLaunchRecord> = serde_json::from_slice(&body)?;
        log::debug!("fetched {} launch records from {}", records.len(), self.url);
        Ok(records)
    }
}

/// In-memory feed for tests and offline development.
#[derive(Debug, Default)]
pub struct InMemoryLaunchFeed {
    records: RwLock<Vec<ExternalLaunchRecord>>,
    unavailable: RwLock<Option<String>>,
    fetches: AtomicUsize,
}

impl InMemoryLaunchFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ExternalLaunchRecord>) -> Self {
        let feed = Self::new();
        feed.set_records(records);
        feed
    }

    pub fn set_records(&self, records: impl IntoIterator<Item = ExternalLaunchRecord>) {
        *self.records.write() = records.into_iter().collect();
    }

    pub fn push(&self, record: ExternalLaunchRecord) {
        self.records.write().push(record);
    }

    /// Make every subsequent fetch fail (or succeed again with `None`).
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.unavailable.write() = reason.map(str::to_owned);
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LaunchFeed for InMemoryLaunchFeed {
    async fn fetch_launches(&self) -> Result<Vec<ExternalLaunchRecord>, FeedError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        if let Some(reason) = self.unavailable.read().clone() {
            return Err(FeedError::Unavailable(reason));
        }
        Ok(self.records.read().clone())
    }
}
