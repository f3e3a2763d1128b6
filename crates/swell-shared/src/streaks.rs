//! Streak calculation over the entry ledger.
//!
//! A streak is a run of consecutive calendar days with at least one
//! completed mission. Both functions are pure over the full ledger.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::day::DayKey;
use crate::ledger::Entry;

/// Streak statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    /// Consecutive days ending today
    pub current: u32,
    /// Best run ever
    pub longest: u32,
    /// Unique days with activity
    pub active_days: u32,
}

fn active_days(entries: &[Entry]) -> BTreeSet<DayKey> {
    entries.iter().map(|e| e.date).collect()
}

/// Count back from `today` while each day has an entry. 0 if today has none.
pub fn current_streak(entries: &[Entry], today: DayKey) -> u32 {
    let days = active_days(entries);
    let mut streak = 0;
    let mut cursor = Some(today);

    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.prev();
    }

    streak
}

/// Longest run of calendar-consecutive active days.
pub fn longest_streak(entries: &[Entry]) -> u32 {
    let days: Vec<DayKey> = active_days(entries).into_iter().collect();
    if days.is_empty() {
        return 0;
    }

    let mut best = 1u32;
    let mut run = 1u32;
    for window in days.windows(2) {
        if window[1].follows(window[0]) {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
    }
    best
}

pub fn streak_stats(entries: &[Entry], today: DayKey) -> StreakStats {
    StreakStats {
        current: current_streak(entries, today),
        longest: longest_streak(entries),
        active_days: active_days(entries).len() as u32,
    }
}
