pub mod player_record;
pub mod ranked_entry;

pub use player_record::{PlayerRecord, RawRecord};
pub use ranked_entry::{RankInfo, RankedEntry};
