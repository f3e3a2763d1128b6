//! Level derivation from cumulative XP.

use serde::Serialize;

/// XP needed to enter each level, ascending.
pub const LEVEL_THRESHOLDS: [u64; 6] = [0, 50, 140, 260, 420, 620];

/// Display label per level index.
pub const LEVEL_LABELS: [&str; 6] = [
    "Arriving",
    "Settling In",
    "Steady Current",
    "Deep Work",
    "Lighthouse",
    "Anchor Point",
];

/// Synthetic span used past the last tabulated threshold.
pub const OVERFLOW_SPAN: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelMeta {
    /// Level index into `LEVEL_THRESHOLDS`
    pub level: usize,
    /// Total XP the meta was derived from
    pub current_xp: u64,
    /// XP at which the next level starts
    pub next_level_xp: u64,
    /// Fraction of the way to the next level (0.0-1.0)
    pub progress: f64,
    pub label: &'static str,
}

impl LevelMeta {
    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }

    /// XP still needed to reach `next_level_xp`.
    pub fn xp_to_next(&self) -> u64 {
        self.next_level_xp.saturating_sub(self.current_xp)
    }
}

/// Derive level, progress and label from total XP.
pub fn compute_level(total_xp: u64) -> LevelMeta {
    let level = LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| threshold <= total_xp)
        .unwrap_or(0);

    let current_base = LEVEL_THRESHOLDS[level];
    let next_base = LEVEL_THRESHOLDS
        .get(level + 1)
        .copied()
        .unwrap_or(current_base + OVERFLOW_SPAN);
    let span = next_base.saturating_sub(current_base).max(1);
    let progress = (total_xp.saturating_sub(current_base) as f64 / span as f64).clamp(0.0, 1.0);

    LevelMeta {
        level,
        current_xp: total_xp,
        next_level_xp: next_base,
        progress,
        label: LEVEL_LABELS[level],
    }
}
