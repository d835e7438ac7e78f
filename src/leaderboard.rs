use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::boards::Boards;
use crate::core::{PlayerRecord, RankInfo, RankedEntry};
use crate::error::{LeaderboardError, Result};
use crate::ingest::{dedupe_players, ingest, ExtractStage};
use crate::profile::PlayerProfile;
use crate::ranking::{RankTable, Ranker, RapidfuzzRanker, SuggestionRanker};

/// Output of one ingestion cycle
///
/// Immutable once built; a refresh produces a new `Leaderboard` rather than
/// patching this one.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    players: Vec<PlayerRecord>,
    table: RankTable,
    raw_count: usize,
    stage: Option<ExtractStage>,
    dropped: usize,
    cycle: u64,
    built_at: DateTime<Utc>,
}

/// Summary of a cycle, for logs and status endpoints
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardStats {
    pub cycle: u64,
    pub players: usize,
    pub raw_records: usize,
    pub dropped_fragments: usize,
    pub stage: Option<ExtractStage>,
    pub built_at: DateTime<Utc>,
}

impl Leaderboard {
    /// Leaderboard with no players, visible before the first cycle completes
    pub fn empty() -> Self {
        Self::from_players(Vec::new(), 0)
    }

    /// Run extraction, normalization, dedupe and ranking over raw feed text
    pub fn from_feed_text(text: &str, cycle: u64) -> Self {
        let ingested = ingest(text);
        let table = RankTable::build(&ingested.players);

        Self {
            players: ingested.players,
            table,
            raw_count: ingested.raw_count,
            stage: ingested.stage,
            dropped: ingested.dropped,
            cycle,
            built_at: Utc::now(),
        }
    }

    /// Build from already-normalized records (deduplicated here)
    pub fn from_players(records: Vec<PlayerRecord>, cycle: u64) -> Self {
        let raw_count = records.len();
        let players = dedupe_players(records);
        let table = RankTable::build(&players);

        Self {
            players,
            table,
            raw_count,
            stage: None,
            dropped: 0,
            cycle,
            built_at: Utc::now(),
        }
    }

    /// Deduplicated players in feed order
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn table(&self) -> &RankTable {
        &self.table
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Top `n` players by overall rank
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        self.table.top(n)
    }

    pub fn rank_of(&self, nickname: &str) -> Option<RankInfo> {
        self.table.lookup(nickname)
    }

    /// Typeahead suggestions
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<PlayerRecord> {
        SuggestionRanker::new().suggest(query, &self.players, limit)
    }

    /// Nicknames close to one that did not match exactly
    pub fn did_you_mean(&self, nickname: &str, limit: usize) -> Vec<String> {
        RapidfuzzRanker::new()
            .rank(nickname, &self.players)
            .into_iter()
            .take(limit)
            .map(|c| c.player.nickname)
            .collect()
    }

    pub fn profile(&self, nickname: &str, avatar_base: Option<&str>) -> Result<PlayerProfile> {
        let entry = self
            .table
            .get(nickname)
            .ok_or_else(|| LeaderboardError::PlayerNotFound(nickname.trim().to_string()))?;

        Ok(PlayerProfile::build(entry, self.table.len(), avatar_base))
    }

    pub fn boards(&self) -> Boards {
        Boards::build(&self.players, &self.table)
    }

    pub fn stats(&self) -> LeaderboardStats {
        LeaderboardStats {
            cycle: self.cycle,
            players: self.players.len(),
            raw_records: self.raw_count,
            dropped_fragments: self.dropped,
            stage: self.stage,
            built_at: self.built_at,
        }
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {"nickname":"Ann","vittorie":2,"kill":0,"livello":5,"morti":1},
        {"nickname":"Bob","vittorie":2,"kill":0,"livello":5,"morti":1},
        {"nickname":"Anna","vittorie":0,"kill":4,"livello":2},
        {"nickname":"bob","vittorie":1}
    ]"#;

    #[test]
    fn test_from_feed_text() {
        let board = Leaderboard::from_feed_text(FEED, 1);
        let stats = board.stats();

        assert_eq!(stats.players, 3);
        assert_eq!(stats.raw_records, 4);
        assert_eq!(stats.stage, Some(ExtractStage::Strict));
        assert_eq!(board.rank_of("ann"), Some(RankInfo { score: 435.0, rank: 1 }));
        assert_eq!(board.rank_of("BOB").map(|i| i.rank), Some(2));
    }

    #[test]
    fn test_profile_lookup() {
        let board = Leaderboard::from_feed_text(FEED, 1);
        let profile = board.profile("  anna ", None).unwrap();
        assert_eq!(profile.record.nickname, "Anna");
        assert_eq!(profile.total, 3);

        let err = board.profile("annie", None).unwrap_err();
        assert!(matches!(err, LeaderboardError::PlayerNotFound(ref n) if n == "annie"));
    }

    #[test]
    fn test_did_you_mean() {
        let board = Leaderboard::from_feed_text(FEED, 1);
        let names = board.did_you_mean("annn", 3);
        assert!(names.contains(&"Ann".to_string()));
        assert!(!names.contains(&"Bob".to_string()));
    }

    #[test]
    fn test_empty() {
        let board = Leaderboard::empty();
        assert!(board.is_empty());
        assert!(board.top(10).is_empty());
        assert!(board.suggest("a", 5).is_empty());
        assert_eq!(board.cycle(), 0);
    }
}
