use std::cmp::Ordering;

use serde::Serialize;

use crate::core::{PlayerRecord, RankedEntry};
use crate::ranking::RankTable;

pub const PODIUM_SIZE: usize = 3;
pub const WINS_BOARD_SIZE: usize = 10;
pub const KILLS_BOARD_SIZE: usize = 5;
pub const RANK_BOARD_SIZE: usize = 10;

/// One row of a single-stat board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEntry {
    /// 1-based position on this board
    pub position: usize,
    pub record: PlayerRecord,
    /// The stat the board is sorted by
    pub value: f64,
}

/// Home-page boards
#[derive(Debug, Clone, Default, Serialize)]
pub struct Boards {
    /// Top three by wins
    pub podium: Vec<BoardEntry>,
    /// Wins positions 4..=10
    pub wins: Vec<BoardEntry>,
    /// Top five by kills
    pub kills: Vec<BoardEntry>,
    /// Top ten by overall score
    pub rank: Vec<RankedEntry>,
}

/// Players with a non-zero stat, highest first, nickname breaking ties.
pub fn stat_board(players: &[PlayerRecord], stat: fn(&PlayerRecord) -> f64, limit: usize) -> Vec<BoardEntry> {
    let mut rows: Vec<&PlayerRecord> = players.iter().filter(|p| stat(p) > 0.0).collect();

    rows.sort_by(|a, b| {
        stat(b)
            .partial_cmp(&stat(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.nickname.to_lowercase().cmp(&b.nickname.to_lowercase()))
            .then_with(|| a.nickname.cmp(&b.nickname))
    });

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| BoardEntry {
            position: i + 1,
            value: stat(record),
            record: record.clone(),
        })
        .collect()
}

impl Boards {
    pub fn build(players: &[PlayerRecord], table: &RankTable) -> Self {
        let mut wins = stat_board(players, |p| p.wins, WINS_BOARD_SIZE);
        let rest = wins.split_off(PODIUM_SIZE.min(wins.len()));

        Self {
            podium: wins,
            wins: rest,
            kills: stat_board(players, |p| p.kills, KILLS_BOARD_SIZE),
            rank: table.top(RANK_BOARD_SIZE).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(nick: &str, wins: f64, kills: f64) -> PlayerRecord {
        PlayerRecord::new(nick).with_stats(wins, kills, 1, 0.0)
    }

    #[test]
    fn test_zero_stats_excluded() {
        let board = stat_board(&[player("a", 0.0, 1.0), player("b", 2.0, 0.0)], |p| p.wins, 10);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].record.nickname, "b");
        assert_eq!(board[0].position, 1);
    }

    #[test]
    fn test_ties_sorted_by_nickname() {
        let board = stat_board(&[player("zoe", 3.0, 0.0), player("Amy", 3.0, 0.0)], |p| p.wins, 10);
        let nicks: Vec<&str> = board.iter().map(|e| e.record.nickname.as_str()).collect();
        assert_eq!(nicks, vec!["Amy", "zoe"]);
    }

    #[test]
    fn test_podium_split() {
        let players: Vec<PlayerRecord> = (1..=12)
            .map(|i| player(&format!("p{:02}", i), i as f64, i as f64))
            .collect();
        let table = RankTable::build(&players);
        let boards = Boards::build(&players, &table);

        assert_eq!(boards.podium.len(), 3);
        assert_eq!(boards.podium[0].record.nickname, "p12");
        assert_eq!(boards.wins.len(), 7);
        assert_eq!(boards.wins[0].position, 4);
        assert_eq!(boards.wins.last().map(|e| e.position), Some(10));
        assert_eq!(boards.kills.len(), 5);
        assert_eq!(boards.rank.len(), 10);
        assert_eq!(boards.rank[0].rank, 1);
    }

    #[test]
    fn test_small_field() {
        let players = vec![player("solo", 1.0, 0.0)];
        let boards = Boards::build(&players, &RankTable::build(&players));
        assert_eq!(boards.podium.len(), 1);
        assert!(boards.wins.is_empty());
        assert!(boards.kills.is_empty());
    }
}
