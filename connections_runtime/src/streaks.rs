//! Streak tracker — consecutive daily wins.
//!
//! A win counts at most once per calendar day. A loss zeroes the current
//! streak but does not mark the day as played. The in-memory Stats are
//! updated before the write, so a failed write loses durability only.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{load_json, save_json, KeyValueStore, STATS_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "lastPlayed")]
    pub last_played_day: String,
    #[serde(rename = "currentStreak")]
    pub current_streak: u32,
    #[serde(rename = "bestStreak")]
    pub best_streak: u32,
}

pub struct StreakTracker {
    stats: Stats,
}

impl StreakTracker {
    /// Read `stats` once. Absent or corrupt means zeros.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            stats: load_json(store, STATS_KEY).unwrap_or_default(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Count a daily win for `day`. A second call for the same day is a no-op.
    pub fn record_win(
        &mut self,
        store: &mut dyn KeyValueStore,
        day: &str,
    ) -> Result<Stats, StoreError> {
        if self.stats.last_played_day == day {
            log::debug!("[STREAK] win for {} already counted", day);
            return Ok(self.stats.clone());
        }

        self.stats.current_streak += 1;
        self.stats.best_streak = self.stats.best_streak.max(self.stats.current_streak);
        self.stats.last_played_day = day.to_string();
        log::info!(
            "[STREAK] win day:{} current:{} best:{}",
            day,
            self.stats.current_streak,
            self.stats.best_streak
        );

        save_json(store, STATS_KEY, &self.stats)?;
        Ok(self.stats.clone())
    }

    /// Zero the current streak. Day and best are kept.
    pub fn record_loss(&mut self, store: &mut dyn KeyValueStore) -> Result<Stats, StoreError> {
        if self.stats.current_streak > 0 {
            log::info!("[STREAK] broken lost_streak:{}", self.stats.current_streak);
        }
        self.stats.current_streak = 0;

        save_json(store, STATS_KEY, &self.stats)?;
        Ok(self.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(StreakTracker::load(&store).stats(), &Stats::default());
    }

    #[test]
    fn test_corrupt_stats_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(STATS_KEY, "not json".to_string()).unwrap();
        assert_eq!(StreakTracker::load(&store).stats(), &Stats::default());
    }

    #[test]
    fn test_win_twice_same_day_counts_once() {
        let mut store = MemoryStore::new();
        let mut t = StreakTracker::load(&store);
        let first = t.record_win(&mut store, "2024-01-01").unwrap();
        let second = t.record_win(&mut store, "2024-01-01").unwrap();
        assert_eq!(first.current_streak, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_consecutive_wins_and_loss() {
        let mut store = MemoryStore::new();
        let mut t = StreakTracker::load(&store);
        t.record_win(&mut store, "2024-01-01").unwrap();
        t.record_win(&mut store, "2024-01-02").unwrap();
        t.record_win(&mut store, "2024-01-03").unwrap();
        assert_eq!(t.stats().current_streak, 3);
        assert_eq!(t.stats().best_streak, 3);

        let after_loss = t.record_loss(&mut store).unwrap();
        assert_eq!(after_loss.current_streak, 0);
        assert_eq!(after_loss.best_streak, 3);
        assert_eq!(after_loss.last_played_day, "2024-01-03");

        t.record_win(&mut store, "2024-01-05").unwrap();
        assert_eq!(t.stats().current_streak, 1);
        assert_eq!(t.stats().best_streak, 3);
    }

    #[test]
    fn test_best_never_decreases() {
        let mut store = MemoryStore::new();
        let mut t = StreakTracker::load(&store);
        let mut best = 0;
        let days = ["d1", "d2", "d2", "d3", "d4", "d5", "d6"];
        for (i, day) in days.iter().enumerate() {
            let s = if i % 3 == 2 {
                t.record_loss(&mut store).unwrap()
            } else {
                t.record_win(&mut store, day).unwrap()
            };
            assert!(s.best_streak >= best);
            best = s.best_streak;
        }
    }

    #[test]
    fn test_persisted_layout_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut t = StreakTracker::load(&store);
        t.record_win(&mut store, "2024-01-01").unwrap();

        let raw = store.get(STATS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"lastPlayed\":\"2024-01-01\""));
        assert!(raw.contains("\"currentStreak\":1"));

        let reloaded = StreakTracker::load(&store);
        assert_eq!(reloaded.stats(), t.stats());
    }
}
