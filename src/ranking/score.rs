use crate::core::PlayerRecord;

// Fixed weights. Deaths count matches played, so they add to the score.
pub const WIN_WEIGHT: f64 = 100.0;
pub const KILL_WEIGHT: f64 = 55.0;
pub const LEVEL_WEIGHT: f64 = 45.0;
pub const MATCH_WEIGHT: f64 = 10.0;

/// Composite rank score: `wins*100 + kills*55 + level*45 + deaths*10`
pub fn score(record: &PlayerRecord) -> f64 {
    record.wins * WIN_WEIGHT
        + record.kills * KILL_WEIGHT
        + f64::from(record.level) * LEVEL_WEIGHT
        + record.deaths * MATCH_WEIGHT
}
