use serde::Serialize;

use crate::core::PlayerRecord;

/// Stat an achievement category is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Wins,
    Kills,
    Progress,
    Presence,
}

impl Track {
    pub fn stat(self, record: &PlayerRecord) -> f64 {
        match self {
            Track::Wins => record.wins,
            Track::Kills => record.kills,
            Track::Progress => f64::from(record.level),
            // deaths = matches played
            Track::Presence => record.deaths,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Track::Wins => "Wins",
            Track::Kills => "Kills",
            Track::Progress => "Progression",
            Track::Presence => "Participation",
        }
    }

    fn describe(self, threshold: u32) -> String {
        let (s, es) = if threshold == 1 { ("", "") } else { ("s", "es") };
        match self {
            Track::Wins => format!("Win {} match{}", threshold, es),
            Track::Kills => format!("Score {} kill{}", threshold, s),
            Track::Progress => format!("Reach level {}", threshold),
            Track::Presence => format!("Play {} match{}", threshold, es),
        }
    }

    fn tiers(self) -> &'static [(&'static str, u32)] {
        match self {
            Track::Wins => &[
                ("First Win", 1),
                ("Double", 2),
                ("Hat Trick", 3),
                ("Four in a Row", 4),
                ("High Five", 5),
            ],
            Track::Kills => &[
                ("First Blood", 1),
                ("Hunter", 3),
                ("Alpha Hunter", 7),
                ("Predator", 15),
                ("War Machine", 20),
            ],
            Track::Progress => &[
                ("Second Step", 2),
                ("Apprentice", 10),
                ("Veteran", 30),
                ("Master", 50),
                ("Grand Master", 80),
                ("Legendary", 100),
                ("Apex", 150),
            ],
            Track::Presence => &[
                ("Warm-up", 2),
                ("Regular", 10),
                ("Tenacious", 30),
                ("Tireless", 50),
                ("Marathoner", 100),
            ],
        }
    }
}

pub const TRACKS: [Track; 4] = [Track::Wins, Track::Kills, Track::Progress, Track::Presence];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub description: String,
    pub threshold: u32,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementCategory {
    pub track: Track,
    pub title: &'static str,
    pub achievements: Vec<Achievement>,
}

impl AchievementCategory {
    pub fn for_record(track: Track, record: &PlayerRecord) -> Self {
        let stat = track.stat(record);
        let achievements = track
            .tiers()
            .iter()
            .map(|&(name, threshold)| Achievement {
                name,
                description: track.describe(threshold),
                threshold,
                unlocked: stat >= f64::from(threshold),
            })
            .collect();

        Self {
            track,
            title: track.title(),
            achievements,
        }
    }

    pub fn unlocked(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn total(&self) -> usize {
        self.achievements.len()
    }
}

/// All achievement categories for a player
pub fn achievements_for(record: &PlayerRecord) -> Vec<AchievementCategory> {
    TRACKS
        .iter()
        .map(|&track| AchievementCategory::for_record(track, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_player_unlocks_nothing() {
        let categories = achievements_for(&PlayerRecord::new("new"));
        assert_eq!(categories.len(), 4);
        assert!(categories.iter().all(|c| c.unlocked() == 0));
        assert_eq!(categories.iter().map(|c| c.total()).sum::<usize>(), 22);
    }

    #[test]
    fn test_thresholds_inclusive() {
        let record = PlayerRecord::new("vet").with_stats(3.0, 7.0, 30, 100.0);
        let categories = achievements_for(&record);

        let unlocked: Vec<(Track, usize)> = categories.iter().map(|c| (c.track, c.unlocked())).collect();
        assert_eq!(
            unlocked,
            vec![
                (Track::Wins, 3),
                (Track::Kills, 3),
                (Track::Progress, 3),
                (Track::Presence, 5)
            ]
        );
    }

    #[test]
    fn test_descriptions() {
        let wins = AchievementCategory::for_record(Track::Wins, &PlayerRecord::new("x"));
        assert_eq!(wins.achievements[0].description, "Win 1 match");
        assert_eq!(wins.achievements[1].description, "Win 2 matches");
        assert_eq!(wins.title, "Wins");
    }
}
