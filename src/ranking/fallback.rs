use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;

use crate::core::PlayerRecord;
use crate::ranking::{RankedCandidate, Ranker};

/// Default similarity (percent) a nickname needs to be offered as "did you mean"
pub const DEFAULT_MIN_SIMILARITY: f64 = 70.0;

/// Rapidfuzz-based ranker for near-miss nicknames
///
/// Only used when an exact profile lookup misses; typeahead ordering stays
/// with [`SuggestionRanker`](crate::ranking::SuggestionRanker).
pub struct RapidfuzzRanker {
    min_score: f64,
}

impl RapidfuzzRanker {
    pub fn new() -> Self {
        Self::with_min_score(DEFAULT_MIN_SIMILARITY)
    }

    pub fn with_min_score(min_score: f64) -> Self {
        Self { min_score }
    }
}

impl Default for RapidfuzzRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker for RapidfuzzRanker {
    fn rank(&self, query: &str, candidates: &[PlayerRecord]) -> Vec<RankedCandidate> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|player| {
                let name_lower = player.nickname.to_lowercase();

                // Jaro-Winkler similarity (0.0 - 1.0)
                let score = jaro_winkler::normalized_similarity(
                    query_lower.chars(),
                    name_lower.chars(),
                );

                // Convert to percentage (0-100)
                let score_pct = score * 100.0;

                (score_pct >= self.min_score).then(|| RankedCandidate::new(player.clone(), score_pct))
            })
            .collect();

        // Sort by score descending
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.player.nickname.cmp(&b.player.nickname))
        });

        ranked
    }

    fn name(&self) -> &str {
        "rapidfuzz"
    }
}
