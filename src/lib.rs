//! # Leaderboard Engine
//!
//! Player leaderboard built from an untrusted feed:
//! - Tolerant extraction (strict array, embedded array, brace scanner, NDJSON)
//! - Alias-aware normalization with safe numeric defaults
//! - Deduplication by case-insensitive nickname
//! - Deterministic scoring and a total ranking order
//! - Typeahead suggestions, rank lookup, profiles, boards
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use leaderboard_engine::{LeaderboardEngine, providers::HttpFeed};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let feed = HttpFeed::new("https://example.com/followers.json", Duration::from_secs(10))?;
//!     let engine = LeaderboardEngine::new(Arc::new(feed));
//!
//!     let board = engine.refresh().await?;
//!     for entry in board.top(10) {
//!         println!("#{} {} - {} pts", entry.rank, entry.record.nickname, entry.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod achievements;
pub mod avatar;
pub mod boards;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod leaderboard;
pub mod profile;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use crate::core::{PlayerRecord, RankInfo, RankedEntry, RawRecord};
pub use config::EngineConfig;
pub use engine::LeaderboardEngine;
pub use error::{LeaderboardError, Result};
pub use leaderboard::{Leaderboard, LeaderboardStats};
pub use profile::PlayerProfile;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
