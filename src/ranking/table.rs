use std::collections::HashMap;

use crate::core::{PlayerRecord, RankInfo, RankedEntry};
use crate::ranking::comparator::{compare_players, ScoredPlayer};

/// Global ranking for one ingestion cycle
///
/// Built in one pass from the deduplicated players; there is no incremental
/// update, a refresh builds a new table.
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    entries: Vec<RankedEntry>,
    /// identity key -> index into `entries`
    index: HashMap<String, usize>,
}

impl RankTable {
    /// Sort players and assign ranks `1..=N`
    pub fn build(players: &[PlayerRecord]) -> Self {
        let mut scored: Vec<ScoredPlayer> = players.iter().cloned().map(ScoredPlayer::new).collect();
        scored.sort_by(|a, b| compare_players(a, b));

        let entries: Vec<RankedEntry> = scored
            .into_iter()
            .enumerate()
            .map(|(i, p)| RankedEntry {
                record: p.record,
                score: p.score,
                rank: i + 1,
            })
            .collect();

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.record.identity_key()).or_insert(i);
        }

        Self { entries, index }
    }

    /// Score and rank for a nickname (matched case-insensitively)
    pub fn lookup(&self, nickname: &str) -> Option<RankInfo> {
        self.get(nickname).map(RankedEntry::info)
    }

    pub fn get(&self, nickname: &str) -> Option<&RankedEntry> {
        let key = nickname.trim().to_lowercase();
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    /// All entries in rank order
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// The first `n` entries
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
