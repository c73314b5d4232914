//! Leaderboard store
//!
//! Durable, ranked record of completed races. The store keeps at most
//! [`MAX_ENTRIES`] of the fastest results: every insert re-sorts by
//! duration and truncates, so a result slower than the current cutoff is
//! silently dropped from durable storage while the call still succeeds.

use serde::{Deserialize, Serialize};

use crate::result::RaceResult;
use crate::storage::{KeyValueStorage, LEADERBOARD_KEY, load_json_or_default, save_json};

/// Fixed cap on ranked entries.
pub const MAX_ENTRIES: usize = 50;

/// One completed race, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Derived from the creation timestamp.
    pub id: String,
    pub start_article: String,
    pub end_article: String,
    pub stats: RaceResult,
    pub timestamp: u64,
}

/// Ranked, capped set of completed-race records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Load the durable record, sorted fastest-first. A missing or
    /// corrupted record yields an empty board.
    #[must_use]
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        let mut entries: Vec<LeaderboardEntry> = load_json_or_default(storage, LEADERBOARD_KEY);
        entries.sort_by_key(|entry| entry.stats.duration_ms);
        Self { entries }
    }

    /// Record a completed race and persist the re-ranked set.
    pub fn add_entry(
        &mut self,
        storage: &impl KeyValueStorage,
        now_ms: u64,
        start_title: &str,
        end_title: &str,
        stats: RaceResult,
    ) {
        self.entries.push(LeaderboardEntry {
            id: now_ms.to_string(),
            start_article: start_title.to_string(),
            end_article: end_title.to_string(),
            stats,
            timestamp: now_ms,
        });
        self.entries.sort_by_key(|entry| entry.stats.duration_ms);
        self.entries.truncate(MAX_ENTRIES);
        self.persist(storage);
    }

    /// Fastest `n` entries, ascending by duration.
    #[must_use]
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// All ranked entries, ascending by duration.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Fastest duration recorded for a specific start/goal pair.
    #[must_use]
    pub fn best_time(&self, start_title: &str, end_title: &str) -> Option<u64> {
        self.entries
            .iter()
            .filter(|entry| entry.start_article == start_title && entry.end_article == end_title)
            .map(|entry| entry.stats.duration_ms)
            .min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, durable record included.
    pub fn clear(&mut self, storage: &impl KeyValueStorage) {
        self.entries.clear();
        if let Err(err) = storage.remove(LEADERBOARD_KEY) {
            log::warn!("failed to clear leaderboard record: {err}");
        }
    }

    fn persist(&self, storage: &impl KeyValueStorage) {
        if let Err(err) = save_json(storage, LEADERBOARD_KEY, &self.entries) {
            log::warn!("failed to save leaderboard: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn stats(duration_ms: u64) -> RaceResult {
        RaceResult {
            duration_ms,
            click_count: 2,
            path_length: 3,
            articles_visited: vec!["A".to_string(), "M".to_string(), "B".to_string()],
        }
    }

    #[test]
    fn entries_rank_ascending_by_duration() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        board.add_entry(&storage, 1, "A", "B", stats(30_000));
        board.add_entry(&storage, 2, "A", "B", stats(10_000));
        board.add_entry(&storage, 3, "A", "B", stats(20_000));

        let durations: Vec<u64> = board
            .entries()
            .iter()
            .map(|entry| entry.stats.duration_ms)
            .collect();
        assert_eq!(durations, vec![10_000, 20_000, 30_000]);
        assert_eq!(board.top(1)[0].stats.duration_ms, 10_000);
    }

    #[test]
    fn insert_beyond_cap_keeps_only_the_fastest() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        for i in 0..(MAX_ENTRIES as u64 + 10) {
            board.add_entry(&storage, i, "A", "B", stats(1_000 + i * 100));
        }
        assert_eq!(board.entries().len(), MAX_ENTRIES);
        // The slowest ten never made the durable cut.
        let slowest = board.entries().last().unwrap().stats.duration_ms;
        assert_eq!(slowest, 1_000 + (MAX_ENTRIES as u64 - 1) * 100);

        let reloaded = Leaderboard::load(&storage);
        assert_eq!(reloaded.entries().len(), MAX_ENTRIES);
    }

    #[test]
    fn reload_preserves_ranking() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        board.add_entry(&storage, 1, "A", "B", stats(42_000));
        board.add_entry(&storage, 2, "C", "D", stats(12_000));

        let reloaded = Leaderboard::load(&storage);
        assert_eq!(reloaded, board);
        assert_eq!(reloaded.top(1)[0].start_article, "C");
    }

    #[test]
    fn corrupted_record_loads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set(LEADERBOARD_KEY, "][ not json").unwrap();
        assert!(Leaderboard::load(&storage).is_empty());
    }

    #[test]
    fn clear_empties_board_and_record() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        board.add_entry(&storage, 1, "A", "B", stats(5_000));
        board.clear(&storage);
        assert!(board.is_empty());
        assert_eq!(storage.get(LEADERBOARD_KEY).unwrap(), None);
        assert!(Leaderboard::load(&storage).is_empty());
    }

    #[test]
    fn best_time_is_scoped_to_the_pair() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        board.add_entry(&storage, 1, "A", "B", stats(30_000));
        board.add_entry(&storage, 2, "A", "B", stats(20_000));
        board.add_entry(&storage, 3, "X", "Y", stats(5_000));

        assert_eq!(board.best_time("A", "B"), Some(20_000));
        assert_eq!(board.best_time("X", "Y"), Some(5_000));
        assert_eq!(board.best_time("A", "Y"), None);
    }

    #[test]
    fn top_tolerates_oversized_requests() {
        let storage = MemoryStorage::new();
        let mut board = Leaderboard::default();
        board.add_entry(&storage, 1, "A", "B", stats(5_000));
        assert_eq!(board.top(100).len(), 1);
        assert!(Leaderboard::default().top(10).is_empty());
    }
}
