pub mod comparator;
pub mod fallback;
pub mod score;
pub mod suggest;
pub mod table;

use crate::core::PlayerRecord;

pub use comparator::{compare_players, Direction, Scored, ScoredPlayer};
pub use fallback::RapidfuzzRanker;
pub use score::score;
pub use suggest::SuggestionRanker;
pub use table::RankTable;

/// Trait for query-driven nickname rankers
pub trait Ranker: Send + Sync {
    /// Rank candidates against query, return sorted best first
    fn rank(&self, query: &str, candidates: &[PlayerRecord]) -> Vec<RankedCandidate>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Candidate with match score
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub player: PlayerRecord,
    pub score: f64,
}

impl RankedCandidate {
    pub fn new(player: PlayerRecord, score: f64) -> Self {
        Self { player, score }
    }
}
