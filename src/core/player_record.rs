use serde::{Deserialize, Serialize};

/// Untyped key/value object recovered from the feed, before normalization
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Canonical player record
///
/// Numeric fields are always finite: missing or garbage input has already
/// been replaced by the documented default during normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    /// Trimmed nickname (empty = unidentifiable, never published)
    #[serde(default)]
    pub nickname: String,

    /// Bare avatar filename, resolved against a base URL by the UI
    #[serde(default)]
    pub avatar_file: String,

    /// Fully-qualified avatar URL, preferred over `avatar_file`
    #[serde(default)]
    pub avatar_url_absolute: String,

    /// Player level (>= 1)
    #[serde(default = "default_level")]
    pub level: u32,

    /// Experience points (>= 0)
    #[serde(default)]
    pub experience: f64,

    /// Kill count (>= 0)
    #[serde(default)]
    pub kills: f64,

    /// Matches played; the feed calls them deaths (>= 0)
    #[serde(default)]
    pub deaths: f64,

    /// Win count (>= 0)
    #[serde(default)]
    pub wins: f64,
}

fn default_level() -> u32 {
    1
}

impl PlayerRecord {
    /// Create a record with every stat at its default
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            avatar_file: String::new(),
            avatar_url_absolute: String::new(),
            level: default_level(),
            experience: 0.0,
            kills: 0.0,
            deaths: 0.0,
            wins: 0.0,
        }
    }

    /// Identity key: lower-cased nickname
    pub fn identity_key(&self) -> String {
        self.nickname.to_lowercase()
    }

    /// Whether the record can be identified at all
    pub fn is_identifiable(&self) -> bool {
        !self.nickname.trim().is_empty()
    }

    pub fn with_stats(mut self, wins: f64, kills: f64, level: u32, deaths: f64) -> Self {
        self.wins = wins;
        self.kills = kills;
        self.level = level.max(1);
        self.deaths = deaths;
        self
    }

    pub fn with_experience(mut self, experience: f64) -> Self {
        self.experience = experience;
        self
    }
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_record_defaults() {
        let record = PlayerRecord::new("Ann");
        assert_eq!(record.level, 1);
        assert_eq!(record.wins, 0.0);
        assert!(record.avatar_file.is_empty());
        assert!(record.is_identifiable());
        assert!(!PlayerRecord::default().is_identifiable());
        assert!(!PlayerRecord::new("   ").is_identifiable());
    }

    #[test]
    fn test_identity_key_is_lowercase() {
        assert_eq!(PlayerRecord::new("DarkLord").identity_key(), "darklord");
    }

    #[test]
    fn test_with_stats_keeps_level_positive() {
        let record = PlayerRecord::new("x").with_stats(1.0, 2.0, 0, 3.0);
        assert_eq!(record.level, 1);
        assert_eq!(record.kills, 2.0);
    }
}
