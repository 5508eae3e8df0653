use std::cmp::Ordering;

use tracing::{debug, info, warn};

use super::entry::LeaderboardEntry;
use super::store::KeyValueStore;
use crate::error::LeaderboardError;

/// Ranked Schulte completion times, persisted as one JSON array under a
/// single store key. The leaderboard is the only writer of that key.
pub struct Leaderboard {
    store: Box<dyn KeyValueStore>,
    key: String,
    max_entries: usize,
    entries: Vec<LeaderboardEntry>,
}

/// Difficulty ascending, then time ascending, then oldest first.
fn rank_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    a.difficulty
        .cmp(&b.difficulty)
        .then_with(|| a.time.total_cmp(&b.time))
        .then_with(|| a.date.cmp(&b.date))
}

/// Fastest first regardless of difficulty; decides what the cap drops.
fn cap_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    a.time.total_cmp(&b.time).then_with(|| a.date.cmp(&b.date))
}

/// Keep the fastest `max_entries` overall, then sort into rank order.
/// Stable, so among equal runs the earlier one stays ahead.
fn normalize(entries: &mut Vec<LeaderboardEntry>, max_entries: usize) {
    if entries.len() > max_entries {
        entries.sort_by(cap_order);
        entries.truncate(max_entries);
    }
    entries.sort_by(rank_order);
}

impl Leaderboard {
    /// Load the collection stored under `key`. Missing, unreadable or
    /// malformed data yields an empty leaderboard.
    pub fn open(store: Box<dyn KeyValueStore>, key: &str, max_entries: usize) -> Self {
        let mut entries = load_entries(store.as_ref(), key);
        normalize(&mut entries, max_entries);
        debug!(key, entries = entries.len(), "leaderboard loaded");
        Leaderboard {
            store,
            key: key.to_string(),
            max_entries,
            entries,
        }
    }

    /// Add a completed run and persist. Returns the 1-based rank of the new
    /// entry within its difficulty, or `None` if it did not make the cut.
    /// Nothing changes in memory unless the store accepts the write.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Result<Option<usize>, LeaderboardError> {
        entry.validate()?;

        // The new run goes after every equal one, so it survives the cap only
        // if fewer than `max_entries` runs are at least as fast.
        let not_slower = self
            .entries
            .iter()
            .filter(|e| cap_order(e, &entry) != Ordering::Greater)
            .count();
        let rank = (not_slower < self.max_entries).then(|| {
            1 + self
                .entries
                .iter()
                .filter(|e| e.difficulty == entry.difficulty)
                .take_while(|e| rank_order(e, &entry) != Ordering::Greater)
                .count()
        });

        let mut next = self.entries.clone();
        next.push(entry.clone());
        normalize(&mut next, self.max_entries);
        self.persist(&next)?;
        self.entries = next;

        info!(
            name = %entry.name,
            difficulty = entry.difficulty,
            time = entry.time,
            rank = ?rank,
            "leaderboard entry recorded"
        );
        Ok(rank)
    }

    /// Entries for one difficulty (or all), best first, at most `limit`.
    pub fn list(&self, difficulty: Option<u32>, limit: Option<usize>) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| difficulty.map_or(true, |d| e.difficulty == d))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Fastest entry for a difficulty
    pub fn best(&self, difficulty: u32) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }

    /// Distinct difficulties present, ascending
    pub fn difficulties(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.entries.iter().map(|e| e.difficulty).collect();
        sizes.dedup();
        sizes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Remove every entry, in memory and in storage.
    pub fn clear(&mut self) -> Result<(), LeaderboardError> {
        self.store.remove(&self.key)?;
        self.entries.clear();
        info!(key = %self.key, "leaderboard cleared");
        Ok(())
    }

    fn persist(&mut self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_string(entries).map_err(crate::error::StoreError::from)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }
}

fn load_entries(store: &dyn KeyValueStore, key: &str) -> Vec<LeaderboardEntry> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "leaderboard unreadable, starting empty");
            return Vec::new();
        }
    };

    // Parse loosely so one bad record does not discard the rest
    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(key, error = %e, "leaderboard data malformed, starting empty");
            return Vec::new();
        }
    };

    let total = values.len();
    let entries: Vec<LeaderboardEntry> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<LeaderboardEntry>(v).ok())
        .filter(|e| e.validate().is_ok())
        .collect();
    if entries.len() < total {
        warn!(key, dropped = total - entries.len(), "skipped invalid leaderboard records");
    }
    entries
}
