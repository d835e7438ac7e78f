//! Total order over players.
//!
//! Score first, then a fixed cascade of stat tie-breaks, then the
//! case-insensitive nickname. Two deduplicated players only compare equal
//! when they are the same player.

use std::cmp::Ordering;

use crate::core::{PlayerRecord, RankedEntry};
use crate::ranking::score::score;

/// Anything that can be placed in the ranking
pub trait Scored {
    fn record(&self) -> &PlayerRecord;

    /// Composite score, possibly precomputed
    fn score(&self) -> f64;
}

impl Scored for PlayerRecord {
    fn record(&self) -> &PlayerRecord {
        self
    }

    fn score(&self) -> f64 {
        score(self)
    }
}

impl Scored for RankedEntry {
    fn record(&self) -> &PlayerRecord {
        &self.record
    }

    fn score(&self) -> f64 {
        self.score
    }
}

/// Player paired with its precomputed score
#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub record: PlayerRecord,
    pub score: f64,
}

impl ScoredPlayer {
    pub fn new(record: PlayerRecord) -> Self {
        let score = score(&record);
        Self { record, score }
    }
}

impl Scored for ScoredPlayer {
    fn record(&self) -> &PlayerRecord {
        &self.record
    }

    fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

type StatKey = fn(&PlayerRecord) -> f64;

fn wins(r: &PlayerRecord) -> f64 {
    r.wins
}

fn kills(r: &PlayerRecord) -> f64 {
    r.kills
}

fn level(r: &PlayerRecord) -> f64 {
    f64::from(r.level)
}

fn deaths(r: &PlayerRecord) -> f64 {
    r.deaths
}

fn experience(r: &PlayerRecord) -> f64 {
    r.experience
}

/// Tie-breaks applied after the score, in order
const STAT_CASCADE: [(StatKey, Direction); 5] = [
    (wins, Direction::Descending),
    (kills, Direction::Descending),
    (level, Direction::Descending),
    (deaths, Direction::Descending),
    (experience, Direction::Descending),
];

// Stats are finite after normalization; partial_cmp only fails on NaN.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Ranking order: `Less` means `a` is ranked above `b`.
pub fn compare_players<A, B>(a: &A, b: &B) -> Ordering
where
    A: Scored + ?Sized,
    B: Scored + ?Sized,
{
    let (ra, rb) = (a.record(), b.record());

    Direction::Descending
        .apply(cmp_f64(a.score(), b.score()))
        .then_with(|| {
            STAT_CASCADE.iter().fold(Ordering::Equal, |ord, (key, direction)| {
                ord.then_with(|| direction.apply(cmp_f64(key(ra), key(rb))))
            })
        })
        .then_with(|| {
            Direction::Ascending.apply(ra.nickname.to_lowercase().cmp(&rb.nickname.to_lowercase()))
        })
}
