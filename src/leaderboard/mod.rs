//! Persisted Schulte leaderboard: entry schema, key-value storage, ranking.

mod entry;
mod ranking;
mod store;

pub use entry::{format_time, validate_difficulty, LeaderboardEntry, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use ranking::Leaderboard;
pub use store::{FileStore, KeyValueStore, MemoryStore};
