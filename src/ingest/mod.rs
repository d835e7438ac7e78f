pub mod dedup;
pub mod extract;
pub mod normalize;
pub mod scanner;

use crate::core::PlayerRecord;

pub use dedup::dedupe_players;
pub use extract::{extract, extract_records, ExtractStage, Extraction};
pub use normalize::normalize_record;

/// Result of running the ingestion stages over one feed
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Deduplicated, identifiable players in first-seen order
    pub players: Vec<PlayerRecord>,

    /// Records recovered from the feed, before deduplication
    pub raw_count: usize,

    /// Extraction stage that recovered the records
    pub stage: Option<ExtractStage>,

    /// Fragments the extractor had to drop
    pub dropped: usize,
}

/// Extract, normalize and deduplicate one feed.
pub fn ingest(text: &str) -> Ingested {
    let extraction = extract(text);
    let raw_count = extraction.records.len();
    let players = dedupe_players(extraction.records.iter().map(normalize_record));

    Ingested {
        players,
        raw_count,
        stage: extraction.stage,
        dropped: extraction.dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_pipeline() {
        let text = r#"[
            {"nickname":"Ann","vittorie":2},
            {"nick":"ann","vittorie":5},
            {"name":"","vittorie":50},
            {"nickname":"Bob"}
        ]"#;
        let ingested = ingest(text);
        assert_eq!(ingested.raw_count, 4);
        assert_eq!(ingested.stage, Some(ExtractStage::Strict));
        assert_eq!(ingested.players.len(), 2);
        assert_eq!(ingested.players[0].nickname, "ann");
        assert_eq!(ingested.players[0].wins, 5.0);
    }

    #[test]
    fn test_ingest_empty_feed() {
        let ingested = ingest("not a feed");
        assert!(ingested.players.is_empty());
        assert_eq!(ingested.stage, None);
    }
}
