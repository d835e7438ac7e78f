use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{LeaderboardError, Result};
use crate::providers::FeedSource;

/// Feed read from a local file
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| LeaderboardError::Feed {
            feed: self.name().to_string(),
            message: format!("cannot read {}: {}", self.path.display(), e),
        })?;

        // Hand-edited feeds sometimes carry a stray invalid byte
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn name(&self) -> &str {
        "file"
    }
}
