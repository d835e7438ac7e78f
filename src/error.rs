use thiserror::Error;

/// Main error type for the leaderboard engine
///
/// The ingestion pipeline itself is infallible; these errors come from the
/// edges (feed fetch, configuration, profile lookup).
#[derive(Error, Debug)]
pub enum LeaderboardError {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Feed fetch/transport errors
    #[error("Feed '{feed}' error: {message}")]
    Feed { feed: String, message: String },

    /// Invalid or incomplete configuration
    #[error("Config error: {0}")]
    Config(String),

    /// No player with that nickname in the current leaderboard
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for LeaderboardError {
    fn from(s: String) -> Self {
        LeaderboardError::Other(s)
    }
}

impl From<&str> for LeaderboardError {
    fn from(s: &str) -> Self {
        LeaderboardError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LeaderboardError>;
