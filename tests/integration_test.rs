use async_trait::async_trait;
use leaderboard_engine::{
    ingest::{extract, extract_records, ExtractStage},
    providers::{FeedSource, FileFeed, StaticFeed},
    Leaderboard, LeaderboardEngine, LeaderboardError, RankInfo,
};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

const FOLLOWERS: &str = r#"
[
  {"nickname":"Ann","vittorie":2,"kill":0,"livello":5,"morti":1,"img_url":"ann.png"},
  {"nickname":"Bob","vittorie":2,"kill":0,"livello":5,"morti":1},
  {"nick":"Stan","wins":4,"kills":1,"livello":2,"deaths":3},
  {"name":"Banana","vittorie":1,"kill":9,"livello":"7"},
  {"nickname":"anna","vittorie":0,"livello":1},
  {"nickname":"ANN","vittorie":1,"kill":50},
  {"nickname":"   ","vittorie":99}
]
"#;

#[test]
fn test_tied_scores_rank_by_nickname() {
    let text = r#"[{"nickname":"Ann","wins":2,"kill":0,"livello":5,"morti":1},
                   {"nickname":"Bob","wins":2,"kill":0,"livello":5,"morti":1}]"#;
    let board = Leaderboard::from_feed_text(text, 1);

    assert_eq!(board.rank_of("ann"), Some(RankInfo { score: 435.0, rank: 1 }));
    assert_eq!(board.rank_of("bob"), Some(RankInfo { score: 435.0, rank: 2 }));
}

#[test]
fn test_line_fallback_scenario() {
    let text = "[{\"nickname\":\"X\"},\n{\"nickname\":\"Y\"}\n]";
    let names: Vec<String> = extract_records(text)
        .iter()
        .filter_map(|r| r.get("nickname").and_then(|v| v.as_str()).map(String::from))
        .collect();
    assert_eq!(names, vec!["X", "Y"]);

    let broken = "[\n{\"nickname\":\"X\"},\n{\"nickname\":\"Y\"},\n";
    let out = extract(broken);
    assert_eq!(out.stage, Some(ExtractStage::Lines));
    assert_eq!(out.records.len(), 2);
}

#[test]
fn test_corrupt_record_among_valid_ones() {
    let text = r#"prefix [
        {"nickname":"A","wins":1},
        {"nickname":"B", "wins": oops},
        {"nickname":"C","note":"has } and { inside"},
        {"nickname":"D"},
    ] suffix"#;
    let board = Leaderboard::from_feed_text(text, 1);
    let names: Vec<&str> = board.players().iter().map(|p| p.nickname.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "D"]);
    assert_eq!(board.stats().dropped_fragments, 1);
}

#[test]
fn test_unrepresentable_fields_keep_the_player() {
    let text = r#"[{"nickname":"Big","kill":1e400,"vittorie":3},
                   {"nickname":"Ok","vittorie":1,"img_url":"ok\udc00.png"}]"#;
    let board = Leaderboard::from_feed_text(text, 1);
    let names: Vec<&str> = board.players().iter().map(|p| p.nickname.as_str()).collect();

    assert_eq!(names, vec!["Big", "Ok"]);
    assert_eq!(board.stats().stage, Some(ExtractStage::Strict));
    assert_eq!(board.stats().dropped_fragments, 0);
    assert_eq!(board.profile("big", None).unwrap().record.kills, 0.0);
}

#[test]
fn test_typeahead_scenario() {
    let text = r#"[{"nickname":"Anna"},{"nickname":"Banana","wins":1},{"nickname":"Stan","wins":3}]"#;
    let board = Leaderboard::from_feed_text(text, 1);
    let names: Vec<String> = board.suggest("an", 5).into_iter().map(|p| p.nickname).collect();
    assert_eq!(names, vec!["Anna", "Stan", "Banana"]);
}

#[test]
fn test_full_feed() {
    let board = Leaderboard::from_feed_text(FOLLOWERS, 1);
    let stats = board.stats();

    // 7 raw records: the blank nickname is dropped and ANN folds into Ann
    assert_eq!(stats.raw_records, 7);
    assert_eq!(stats.players, 5);

    // Ann (2 wins) beats ANN (1 win) on dedupe even though ANN has more kills
    let ann = board.profile("ann", None).unwrap();
    assert_eq!(ann.record.kills, 0.0);
    assert_eq!(ann.record.avatar_file, "ann.png");

    let ranks: Vec<usize> = board.table().entries().iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

    // Banana: 100 + 9*55 + 7*45 = 910
    assert_eq!(board.top(1)[0].record.nickname, "Banana");
    assert_eq!(board.top(1)[0].score, 910.0);

    let boards = board.boards();
    assert_eq!(boards.podium[0].record.nickname, "Stan");
    assert_eq!(boards.kills[0].record.nickname, "Banana");
}

#[test]
fn test_total_parse_failure_is_empty_board() {
    let board = Leaderboard::from_feed_text("<html>oops</html>", 3);
    assert!(board.is_empty());
    assert_eq!(board.stats().stage, None);
    assert!(matches!(board.profile("ann", None), Err(LeaderboardError::PlayerNotFound(_))));
}

#[tokio::test]
async fn test_engine_with_file_feed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FOLLOWERS.as_bytes()).unwrap();

    let engine = LeaderboardEngine::new(Arc::new(FileFeed::new(file.path())));
    let board = engine.refresh().await.unwrap();

    assert_eq!(board.len(), 5);
    assert_eq!(engine.snapshot().await.rank_of("stan").map(|i| i.rank), board.rank_of("Stan").map(|i| i.rank));
}

#[tokio::test]
async fn test_refresh_replaces_previous_cycle() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"nickname":"Old"}]"#).unwrap();

    let engine = LeaderboardEngine::new(Arc::new(FileFeed::new(file.path())));
    engine.refresh().await.unwrap();
    assert!(engine.snapshot().await.rank_of("old").is_some());

    std::fs::write(file.path(), r#"[{"nickname":"New"}]"#).unwrap();
    engine.refresh().await.unwrap();

    let snapshot = engine.snapshot().await;
    assert!(snapshot.rank_of("old").is_none());
    assert!(snapshot.rank_of("new").is_some());
}

#[tokio::test]
async fn test_empty_feed_publishes_empty_board() {
    let engine = LeaderboardEngine::new(Arc::new(StaticFeed::new("   ")));
    let board = engine.refresh().await.unwrap();
    assert!(board.is_empty());
    assert_eq!(engine.snapshot().await.cycle(), 1);
}

/// Feed whose responses are released by the test, in any order
struct GatedFeed {
    responses: Mutex<VecDeque<(String, oneshot::Receiver<()>)>>,
}

impl GatedFeed {
    fn queued(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl FeedSource for GatedFeed {
    async fn fetch(&self) -> leaderboard_engine::Result<String> {
        let next = self.responses.lock().unwrap().pop_front();
        let (text, gate) = next.ok_or_else(|| LeaderboardError::Other("no response queued".into()))?;
        let _ = gate.await;
        Ok(text)
    }

    fn name(&self) -> &str {
        "gated"
    }
}

#[tokio::test]
async fn test_last_completed_cycle_wins() {
    let (release_slow, slow_gate) = oneshot::channel();
    let (release_fast, fast_gate) = oneshot::channel();

    let feed = Arc::new(GatedFeed {
        responses: Mutex::new(VecDeque::from([
            (r#"[{"nickname":"Slow"}]"#.to_string(), slow_gate),
            (r#"[{"nickname":"Fast"}]"#.to_string(), fast_gate),
        ])),
    });
    let engine = Arc::new(LeaderboardEngine::new(feed.clone()));

    let slow = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.refresh().await }
    });
    while feed.queued() > 1 {
        tokio::task::yield_now().await;
    }
    let fast = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.refresh().await }
    });
    while feed.queued() > 0 {
        tokio::task::yield_now().await;
    }

    // The cycle started second completes first...
    release_fast.send(()).unwrap();
    fast.await.unwrap().unwrap();
    assert!(engine.snapshot().await.rank_of("fast").is_some());

    // ...and the one that completes last is what readers see.
    release_slow.send(()).unwrap();
    slow.await.unwrap().unwrap();
    let snapshot = engine.snapshot().await;
    assert!(snapshot.rank_of("slow").is_some());
    assert!(snapshot.rank_of("fast").is_none());
}

#[test]
fn test_blocking_refresh_with_tokio_test() {
    let engine = LeaderboardEngine::new(Arc::new(StaticFeed::new(FOLLOWERS)));
    let board = tokio_test::block_on(engine.refresh()).unwrap();
    assert_eq!(board.suggest("an", 10).len(), 4);
}
