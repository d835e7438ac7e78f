pub mod file;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{LeaderboardError, Result};

pub use file::FileFeed;
pub use http::HttpFeed;
pub use memory::StaticFeed;

/// Trait for raw feed sources (HTTP, local file, in-memory)
///
/// A source only delivers text; it never parses it. One call is one fetch,
/// with no retry.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current feed text
    async fn fetch(&self) -> Result<String>;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Build the configured feed source (URL wins over path)
pub fn feed_from_config(config: &EngineConfig) -> Result<Arc<dyn FeedSource>> {
    if let Some(url) = &config.feed.url {
        return Ok(Arc::new(HttpFeed::new(url.clone(), config.http_timeout())?));
    }
    if let Some(path) = &config.feed.path {
        return Ok(Arc::new(FileFeed::new(path.clone())));
    }
    Err(LeaderboardError::Config(
        "no feed configured (set feed.url or feed.path)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_url_preferred_over_path() {
        let mut config = EngineConfig::default();
        config.feed.url = Some("https://example.com/followers.json".to_string());
        config.feed.path = Some(PathBuf::from("followers.json"));

        let source = feed_from_config(&config).unwrap();
        assert_eq!(source.name(), "http");
    }

    #[test]
    fn test_path_feed() {
        let mut config = EngineConfig::default();
        config.feed.path = Some(PathBuf::from("followers.json"));
        assert_eq!(feed_from_config(&config).unwrap().name(), "file");
    }

    #[test]
    fn test_missing_feed() {
        let result = feed_from_config(&EngineConfig::default());
        assert!(matches!(result, Err(LeaderboardError::Config(_))));
    }
}
