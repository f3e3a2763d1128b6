//! Shared types and logic for Swell Getaway components.
//!
//! Everything in this crate is pure and synchronous: daily content, the
//! progression ledger, streaks, reward math and the shoreline coach lines.
//! Network scoring and configuration live in `swell_common`.

pub mod coach;
pub mod content;
pub mod day;
pub mod error;
pub mod ledger;
pub mod level;
pub mod mission;
pub mod progression;
pub mod reward;
pub mod streaks;
pub mod unlocks;

pub use content::{generate_daily, seed_hash, DailyContent};
pub use day::DayKey;
pub use error::SwellError;
pub use ledger::{Entry, LedgerStore, MemoryLedger};
pub use level::{compute_level, LevelMeta};
pub use mission::{Focus, Mission, Tier};
pub use progression::{ProgressionSnapshot, ProgressionState};
pub use reward::{GuardrailHit, Reward, RewardSource, ShellPolicy};
pub use streaks::{current_streak, longest_streak, streak_stats, StreakStats};
pub use unlocks::{compute_unlocks, Milestone, UnlockSet};
