use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

use crate::error::{LeaderboardError, Result};
use crate::providers::FeedSource;

/// Feed served over HTTP(S)
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    /// Create new HTTP feed
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn error(&self, message: String) -> LeaderboardError {
        LeaderboardError::Feed {
            feed: self.name().to_string(),
            message,
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<String> {
        // Cache buster
        let stamp = Utc::now().timestamp_millis().to_string();

        let response = self
            .client
            .get(&self.url)
            .query(&[("_", stamp.as_str())])
            .send()
            .await
            .map_err(|e| self.error(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(self.error(format!("HTTP {} from {}", response.status(), self.url)));
        }

        response
            .text()
            .await
            .map_err(|e| self.error(format!("Reading body failed: {}", e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}
