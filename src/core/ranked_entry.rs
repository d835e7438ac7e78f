use serde::{Deserialize, Serialize};
use crate::core::PlayerRecord;

/// A player at its position in the global ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    pub record: PlayerRecord,

    /// Composite score
    pub score: f64,

    /// 1-based position, unique across the table
    pub rank: usize,
}

/// Score and rank of one player, as returned by a table lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankInfo {
    pub score: f64,
    pub rank: usize,
}

impl RankedEntry {
    pub fn info(&self) -> RankInfo {
        RankInfo {
            score: self.score,
            rank: self.rank,
        }
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!("#{} {} ({} pts)", self.rank, self.record.nickname, self.score)
    }
}
