/// Metrics endpoint client
///
/// Fetches a snapshot from `GET <endpoint>/api/metrics`. Every way the fetch can
/// go wrong collapses into [`Unavailable`].

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::core::snapshot::MetricsSnapshot;
use crate::utils::metrics_url;

/// The endpoint could not produce a snapshot
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("invalid metrics payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Something that can be asked for the current metrics
pub trait MetricsSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<MetricsSnapshot, Unavailable>>;
}

pub struct HttpMetricsSource {
    client: Client,
    url: String,
}

impl HttpMetricsSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            url: metrics_url(endpoint),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_snapshot(&self) -> Result<MetricsSnapshot, Unavailable> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status));
        }

        let body = response.bytes().await?;
        Ok(MetricsSnapshot::from_slice(&body)?)
    }
}

impl MetricsSource for HttpMetricsSource {
    fn fetch(&self) -> BoxFuture<'_, Result<MetricsSnapshot, Unavailable>> {
        self.fetch_snapshot().boxed()
    }
}
