use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{LeaderboardError, Result};

/// Where the raw feed comes from
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// HTTP(S) URL of the feed (takes precedence over `path`)
    pub url: Option<String>,

    /// Local file path of the feed
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

/// Engine configuration
///
/// ```yaml
/// feed:
///   url: https://example.com/followers.json
/// avatar_base: cdn.example.com/avatars
/// refresh_interval_secs: 60
/// suggestion_limit: 5
/// server:
///   port: 8090
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub feed: FeedConfig,

    /// Base URL bare avatar filenames are resolved against
    pub avatar_base: Option<String>,

    /// Seconds between background refreshes (0 = disabled)
    pub refresh_interval_secs: u64,

    /// Default typeahead size
    pub suggestion_limit: usize,

    /// Feed request timeout
    pub http_timeout_secs: u64,

    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            avatar_base: None,
            refresh_interval_secs: 60,
            suggestion_limit: 5,
            http_timeout_secs: 10,
            server: ServerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LeaderboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from environment variables
    ///
    /// `LEADERBOARD_FEED_URL`, `LEADERBOARD_FEED_PATH`, `AVATAR_BASE`,
    /// `REFRESH_INTERVAL_SECS`, `PORT`.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LEADERBOARD_FEED_URL") {
            self.feed.url = Some(url);
        }
        if let Some(path) = lookup("LEADERBOARD_FEED_PATH") {
            self.feed.path = Some(PathBuf::from(path));
        }
        if let Some(base) = lookup("AVATAR_BASE") {
            self.avatar_base = Some(base);
        }
        if let Some(secs) = lookup("REFRESH_INTERVAL_SECS") {
            self.refresh_interval_secs = parse_env("REFRESH_INTERVAL_SECS", &secs)?;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }
        Ok(self)
    }

    /// `None` when periodic refresh is disabled
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| LeaderboardError::Config(format!("invalid {}: {:?}", key, value)))
}
