use std::cmp::Ordering;

use crate::core::PlayerRecord;
use crate::ranking::{RankedCandidate, Ranker};

const PREFIX_MATCH: f64 = 2.0;
const SUBSTRING_MATCH: f64 = 1.0;

/// Typeahead ranker: case-insensitive substring match on nicknames
///
/// Ordering is prefix matches before inner matches, then more wins, then
/// nickname. It deliberately ignores the leaderboard score.
pub struct SuggestionRanker;

impl SuggestionRanker {
    pub fn new() -> Self {
        Self
    }

    /// Up to `limit` matching players, best first
    pub fn suggest(&self, query: &str, candidates: &[PlayerRecord], limit: usize) -> Vec<PlayerRecord> {
        self.rank(query, candidates)
            .into_iter()
            .take(limit)
            .map(|c| c.player)
            .collect()
    }
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_suggestions(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.player.wins.partial_cmp(&a.player.wins).unwrap_or(Ordering::Equal))
        .then_with(|| {
            a.player
                .nickname
                .to_lowercase()
                .cmp(&b.player.nickname.to_lowercase())
        })
        .then_with(|| a.player.nickname.cmp(&b.player.nickname))
}

impl Ranker for SuggestionRanker {
    fn rank(&self, query: &str, candidates: &[PlayerRecord]) -> Vec<RankedCandidate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|player| {
                let idx = player.nickname.to_lowercase().find(&query)?;
                let score = if idx == 0 { PREFIX_MATCH } else { SUBSTRING_MATCH };
                Some(RankedCandidate::new(player.clone(), score))
            })
            .collect();

        ranked.sort_by(compare_suggestions);
        ranked
    }

    fn name(&self) -> &str {
        "substring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(nick: &str, wins: f64) -> PlayerRecord {
        PlayerRecord::new(nick).with_stats(wins, 0.0, 1, 0.0)
    }

    fn nicks(players: &[PlayerRecord]) -> Vec<&str> {
        players.iter().map(|p| p.nickname.as_str()).collect()
    }

    #[test]
    fn test_prefix_beats_substring() {
        let players = vec![player("Banana", 1.0), player("Stan", 4.0), player("Anna", 0.0)];
        let out = SuggestionRanker::new().suggest("an", &players, 5);
        assert_eq!(nicks(&out), vec!["Anna", "Stan", "Banana"]);
    }

    #[test]
    fn test_wins_break_match_tie() {
        let players = vec![player("Stan", 1.0), player("Banana", 3.0), player("Anna", 0.0)];
        let out = SuggestionRanker::new().suggest("AN", &players, 5);
        assert_eq!(nicks(&out), vec!["Anna", "Banana", "Stan"]);
    }

    #[test]
    fn test_nickname_breaks_full_tie() {
        let players = vec![player("zed", 0.0), player("Zara", 0.0), player("zack", 0.0)];
        let out = SuggestionRanker::new().suggest("z", &players, 5);
        assert_eq!(nicks(&out), vec!["zack", "Zara", "zed"]);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let players = vec![player("Anna", 0.0)];
        assert!(SuggestionRanker::new().suggest("", &players, 5).is_empty());
        assert!(SuggestionRanker::new().suggest("   ", &players, 5).is_empty());
    }

    #[test]
    fn test_limit_and_no_match() {
        let players: Vec<PlayerRecord> = (0..10).map(|i| player(&format!("p{}", i), 0.0)).collect();
        assert_eq!(SuggestionRanker::new().suggest("p", &players, 3).len(), 3);
        assert!(SuggestionRanker::new().suggest("q", &players, 3).is_empty());
    }
}
