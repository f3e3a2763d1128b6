//! Deterministic daily content.
//!
//! The same calendar day always yields the same prompt and mission stack.
//! Every day returns one relationships rep, one stress rep and one
//! performance rep; the focus argument is kept so callers can pass the
//! user's selection, but it does not change the stack.

use serde::Serialize;

use crate::day::DayKey;
use crate::mission::{Focus, Mission, Tier};

const PROMPTS: [&str; 6] = [
    "Pick one real moment today and try a softer, clearer version of yourself.",
    "Choose one stress spike you expect and decide how you want to handle it.",
    "Give one person a reply you will be proud of later.",
    "Protect one block of focus for work that actually matters to you.",
    "Name one thing that is in your control and act on it.",
    "Turn one defensive instinct into a curious question.",
];

const RELATIONSHIP_MISSIONS: [&str; 3] = [
    "Send one honest check-in to someone who matters.",
    "In one hard moment, listen fully before you answer.",
    "Thank someone directly for something you usually overlook.",
];

const STRESS_MISSIONS: [&str; 3] = [
    "Take 3 slow breaths before a moment that usually spikes you.",
    "Step away from your screen for 60 seconds when you feel flooded.",
    "Name the top stressor out loud and choose one next step.",
];

const PERFORMANCE_MISSIONS: [&str; 3] = [
    "Give your most important task five extra minutes of clean focus.",
    "Clarify success for one task in a single sentence before you start.",
    "Ask one direct question that removes uncertainty at work.",
];

/// Suffix mixed into the prompt seed so prompts and missions rotate independently.
const PROMPT_SALT: &str = "unified";

/// One slot of the daily stack: where the label comes from and what it pays.
struct Slot {
    pool: &'static [&'static str],
    offset: u64,
    tier: Tier,
    xp: u32,
    shells: u32,
}

const SLOTS: [Slot; 3] = [
    Slot {
        pool: &RELATIONSHIP_MISSIONS,
        offset: 1,
        tier: Tier::Core,
        xp: 18,
        shells: 2,
    },
    Slot {
        pool: &STRESS_MISSIONS,
        offset: 7,
        tier: Tier::Easy,
        xp: 10,
        shells: 1,
    },
    Slot {
        pool: &PERFORMANCE_MISSIONS,
        offset: 13,
        tier: Tier::Stretch,
        xp: 24,
        shells: 3,
    },
];

/// Today's prompt and missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyContent {
    pub date: DayKey,
    pub focus: Focus,
    pub prompt: String,
    pub missions: [Mission; 3],
}

impl DailyContent {
    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }
}

/// Stable string hash used as the selection seed.
///
/// 32-bit wrapping `h * 31 + unit` over UTF-16 code units, reinterpreted as
/// signed, then absolute value. `i32::MIN` maps to `2^31`.
pub fn seed_hash(s: &str) -> u32 {
    let h = s
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
    (h as i32).unsigned_abs()
}

fn pick(seed: u32, offset: u64, len: usize) -> usize {
    ((u64::from(seed) + offset) % len as u64) as usize
}

/// Prompt text for a day.
pub fn daily_prompt(date: DayKey) -> &'static str {
    let seed = seed_hash(&format!("{}{}", date, PROMPT_SALT));
    PROMPTS[pick(seed, 0, PROMPTS.len())]
}

/// The three missions for a day, in card order (core, easy, stretch).
pub fn daily_missions(date: DayKey) -> [Mission; 3] {
    let day = date.to_string();
    let base = seed_hash(&day);

    SLOTS.map(|slot| Mission {
        id: format!("{}-{}-{}", day, slot.tier, slot.offset),
        label: slot.pool[pick(base, slot.offset, slot.pool.len())].to_string(),
        xp: slot.xp,
        tier: slot.tier,
        reward_shells: slot.shells,
        requires_reflection: slot.tier.requires_reflection(),
    })
}

/// A one-off mission with the standard face values for `tier`.
pub fn mission_for(date: DayKey, tier: Tier, label: &str) -> Mission {
    let (offset, xp, shells) = SLOTS
        .iter()
        .find(|slot| slot.tier == tier)
        .map(|slot| (slot.offset, slot.xp, slot.shells))
        .unwrap_or((0, 0, 0));

    Mission {
        id: format!("{}-{}-{}", date, tier, offset),
        label: label.to_string(),
        xp,
        tier,
        reward_shells: shells,
        requires_reflection: tier.requires_reflection(),
    }
}

/// Generate the full daily content for `(date, focus)`.
pub fn generate_daily(date: DayKey, focus: Focus) -> DailyContent {
    DailyContent {
        date,
        focus,
        prompt: daily_prompt(date).to_string(),
        missions: daily_missions(date),
    }
}
