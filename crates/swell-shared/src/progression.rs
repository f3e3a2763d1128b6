//! Progression state: the ledger plus everything derived from it.
//!
//! Totals, level and unlocks are recomputed from the ledger on every read.
//! Nothing is cached, so there is no way for a total to drift from the
//! entries it summarises.

use serde::Serialize;
use std::collections::HashSet;

use crate::day::DayKey;
use crate::ledger::{Entry, LedgerStore, MemoryLedger};
use crate::level::{compute_level, LevelMeta};
use crate::mission::Mission;
use crate::streaks::{streak_stats, StreakStats};
use crate::unlocks::{compute_unlocks, UnlockSet};

#[derive(Debug, Clone, Default)]
pub struct ProgressionState<S = MemoryLedger> {
    store: S,
}

impl ProgressionState<MemoryLedger> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: LedgerStore> ProgressionState<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Append `entry` unless its `(date, mission_id)` slot is taken.
    ///
    /// Returns `false` for a duplicate claim; that is not an error.
    pub fn record_entry(&mut self, entry: Entry) -> bool {
        if self.store.contains(entry.date, &entry.mission_id) {
            return false;
        }
        self.store.append(entry);
        true
    }

    /// Ledger entries, most recent first.
    pub fn entries(&self) -> &[Entry] {
        self.store.read_all()
    }

    pub fn total_xp(&self) -> u64 {
        self.entries().iter().map(|e| u64::from(e.xp)).sum()
    }

    pub fn total_shells(&self) -> u64 {
        self.entries().iter().map(|e| u64::from(e.shells)).sum()
    }

    pub fn level(&self) -> LevelMeta {
        compute_level(self.total_xp())
    }

    pub fn unlocks(&self) -> UnlockSet {
        compute_unlocks(self.total_xp(), self.total_shells())
    }

    pub fn streaks(&self, today: DayKey) -> StreakStats {
        streak_stats(self.entries(), today)
    }

    pub fn is_claimed(&self, date: DayKey, mission_id: &str) -> bool {
        self.store.contains(date, mission_id)
    }

    /// Mission ids claimed on `date`.
    pub fn completed_on(&self, date: DayKey) -> HashSet<&str> {
        self.entries()
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.mission_id.as_str())
            .collect()
    }

    /// How many of `missions` are done on `date` ("1/3 today").
    pub fn missions_completed(&self, missions: &[Mission], date: DayKey) -> usize {
        let done = self.completed_on(date);
        missions
            .iter()
            .filter(|m| done.contains(m.id.as_str()))
            .count()
    }

    pub fn snapshot(&self, today: DayKey) -> ProgressionSnapshot {
        ProgressionSnapshot {
            total_xp: self.total_xp(),
            total_shells: self.total_shells(),
            level: self.level(),
            unlocks: self.unlocks(),
            streaks: self.streaks(today),
            entries: self.entries().len(),
        }
    }
}

/// Point-in-time view for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSnapshot {
    pub total_xp: u64,
    pub total_shells: u64,
    pub level: LevelMeta,
    pub unlocks: UnlockSet,
    pub streaks: StreakStats,
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Focus;

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2024, 7, d).unwrap()
    }

    #[test]
    fn test_totals_follow_ledger() {
        let mut state = ProgressionState::new();
        assert!(state.record_entry(Entry::new(day(1), Focus::Stress, "a", 20, 2)));
        assert!(state.record_entry(Entry::new(day(1), Focus::Stress, "b", 35, 3)));
        assert_eq!(state.total_xp(), 55);
        assert_eq!(state.total_shells(), 5);
        assert_eq!(state.level().level, 1);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut state = ProgressionState::new();
        assert!(state.record_entry(Entry::new(day(1), Focus::Stress, "a", 20, 2)));
        assert!(!state.record_entry(Entry::new(day(1), Focus::Stress, "a", 60, 4)));
        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.total_xp(), 20);
        assert_eq!(state.total_shells(), 2);
    }

    #[test]
    fn test_same_mission_id_other_day_is_allowed() {
        let mut state = ProgressionState::new();
        assert!(state.record_entry(Entry::new(day(1), Focus::Stress, "a", 20, 2)));
        assert!(state.record_entry(Entry::new(day(2), Focus::Stress, "a", 20, 2)));
        assert_eq!(state.entries().len(), 2);
    }
}
