use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::leaderboard::Leaderboard;
use crate::profile::PlayerProfile;
use crate::providers::{feed_from_config, FeedSource};

/// Ingestion-cycle orchestrator
///
/// Each refresh is an independent pipeline over freshly fetched text. The
/// finished leaderboard is swapped in whole; whichever cycle finishes last is
/// the one readers see. Readers hold an `Arc` to the snapshot they got, so a
/// refresh never mutates data someone is reading.
pub struct LeaderboardEngine {
    source: Arc<dyn FeedSource>,
    current: RwLock<Arc<Leaderboard>>,
    cycles: AtomicU64,
    avatar_base: Option<String>,
}

impl LeaderboardEngine {
    /// Create an engine over a feed source; nothing is fetched yet
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(Leaderboard::empty())),
            cycles: AtomicU64::new(0),
            avatar_base: None,
        }
    }

    /// Create an engine from configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let source = feed_from_config(config)?;
        Ok(Self::new(source).with_avatar_base(config.avatar_base.clone()))
    }

    pub fn with_avatar_base(mut self, avatar_base: Option<String>) -> Self {
        self.avatar_base = avatar_base;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Run one ingestion cycle and publish its result
    ///
    /// A fetch failure is returned and the previously published leaderboard
    /// stays visible. A feed with nothing recoverable publishes an empty one.
    pub async fn refresh(&self) -> Result<Arc<Leaderboard>> {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("⚠️ Cycle {}: feed {} failed: {}", cycle, self.source.name(), e);
                return Err(e);
            }
        };

        let leaderboard = Arc::new(Leaderboard::from_feed_text(&text, cycle));
        let stats = leaderboard.stats();

        *self.current.write().await = Arc::clone(&leaderboard);

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        if leaderboard.is_empty() {
            tracing::warn!(
                "⚠️ Cycle {}: no players recovered from {} bytes of feed",
                cycle,
                text.len()
            );
        } else {
            tracing::info!(
                "✅ Cycle {}: {} players from {} records via {:?} ({} dropped, {:.2}ms)",
                cycle,
                stats.players,
                stats.raw_records,
                stats.stage,
                stats.dropped_fragments,
                latency_ms
            );
            if let Some(leader) = leaderboard.top(1).first() {
                tracing::debug!("👑 Cycle {} leader: {}", cycle, leader.display());
            }
        }

        Ok(leaderboard)
    }

    /// Currently published leaderboard
    pub async fn snapshot(&self) -> Arc<Leaderboard> {
        Arc::clone(&*self.current.read().await)
    }

    /// Profile from the current leaderboard, with avatars resolved
    pub async fn profile(&self, nickname: &str) -> Result<PlayerProfile> {
        self.snapshot()
            .await
            .profile(nickname, self.avatar_base.as_deref())
    }

    /// Refresh every `interval` in the background until the task is aborted
    ///
    /// The first refresh happens one interval from now; failures are logged
    /// and the loop keeps going.
    pub fn spawn_periodic_refresh(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    tracing::debug!("Periodic refresh failed: {}", e);
                }
            }
        })
    }
}
