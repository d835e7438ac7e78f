use std::collections::HashMap;

use crate::core::PlayerRecord;

/// Collapse records that share an identity key (lower-cased nickname).
///
/// The record with more wins survives; on equal wins the later one
/// overwrites. Each survivor keeps the position where its key was first
/// seen. Records without a nickname are dropped.
pub fn dedupe_players<I>(records: I) -> Vec<PlayerRecord>
where
    I: IntoIterator<Item = PlayerRecord>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut players: Vec<PlayerRecord> = Vec::new();

    for record in records {
        if !record.is_identifiable() {
            continue;
        }
        let key = record.identity_key();

        match slots.get(&key) {
            Some(&idx) => {
                if record.wins >= players[idx].wins {
                    players[idx] = record;
                }
            }
            None => {
                slots.insert(key, players.len());
                players.push(record);
            }
        }
    }

    players
}
