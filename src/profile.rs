use serde::Serialize;

use crate::achievements::{achievements_for, AchievementCategory};
use crate::avatar::{resolve_avatar, AvatarPlan};
use crate::core::{PlayerRecord, RankedEntry};

/// Experience needed to fill the progress bar
pub const XP_PER_LEVEL: f64 = 100.0;

/// Experience bar state within the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XpProgress {
    pub current: f64,
    pub max: f64,
}

impl XpProgress {
    pub fn from_experience(experience: f64) -> Self {
        Self {
            current: experience.clamp(0.0, XP_PER_LEVEL),
            max: XP_PER_LEVEL,
        }
    }

    /// Fill ratio as a percentage (0-100)
    pub fn percent(&self) -> f64 {
        self.current / self.max * 100.0
    }
}

/// Everything a profile page shows for one player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub record: PlayerRecord,
    pub score: f64,
    pub rank: usize,
    /// Number of ranked players
    pub total: usize,
    pub xp: XpProgress,
    pub avatar: AvatarPlan,
    pub achievements: Vec<AchievementCategory>,
}

impl PlayerProfile {
    pub fn build(entry: &RankedEntry, total: usize, avatar_base: Option<&str>) -> Self {
        Self {
            record: entry.record.clone(),
            score: entry.score,
            rank: entry.rank,
            total,
            xp: XpProgress::from_experience(entry.record.experience),
            avatar: resolve_avatar(&entry.record, avatar_base),
            achievements: achievements_for(&entry.record),
        }
    }

    /// `@nickname` handle, lower-cased
    pub fn handle(&self) -> String {
        format!("@{}", self.record.identity_key())
    }

    /// "#rank of total" summary line
    pub fn rank_label(&self) -> String {
        format!("#{} of {}", self.rank, self.total)
    }
}
