//! Reward math: guardrails, tier bonus, clamping and shell derivation.
//!
//! The async half of the pipeline (remote scoring) lives in
//! `swell_common::pipeline`; everything here is deterministic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::mission::{Mission, Tier};

/// Floor of any granted XP
pub const MIN_XP: u32 = 10;

/// Ceiling of any granted XP
pub const MAX_XP: u32 = 60;

/// Used when the scorer replies but leaves `xp` out or sends a non-number.
pub const DEFAULT_SCORED_XP: f64 = 20.0;

pub const GUARDRAIL_NOTE: &str =
    "Thanks for being honest. Notice this moment and let's try a small rep next time.";

pub const DEFAULT_NOTE: &str = "Nice rep. Keep going.";

static NEGATIVE_ANSWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(no|nope|nah)$").expect("static regex"));
static DIDNT_DO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)didn.?t do").expect("static regex"));
static NOTHING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)nothing").expect("static regex"));

/// Why a reflection was stopped before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailHit {
    Empty,
    Negative,
    AdmittedNothing,
}

/// Check a reflection for low-effort answers.
pub fn guardrail(reflection: &str) -> Option<GuardrailHit> {
    let trimmed = reflection.trim();
    if trimmed.is_empty() {
        Some(GuardrailHit::Empty)
    } else if NEGATIVE_ANSWER.is_match(trimmed) {
        Some(GuardrailHit::Negative)
    } else if DIDNT_DO.is_match(reflection) || NOTHING.is_match(reflection) {
        Some(GuardrailHit::AdmittedNothing)
    } else {
        None
    }
}

/// Force a raw XP value into `[MIN_XP, MAX_XP]`. NaN lands on the floor.
pub fn clamp_xp(raw: f64) -> u32 {
    if raw.is_nan() {
        return MIN_XP;
    }
    raw.round().clamp(f64::from(MIN_XP), f64::from(MAX_XP)) as u32
}

/// Apply the tier bonus to a remote score and clamp. A missing score uses
/// `DEFAULT_SCORED_XP`.
pub fn finalize_scored_xp(raw: Option<f64>, tier: Tier) -> u32 {
    let base = raw.filter(|v| v.is_finite()).unwrap_or(DEFAULT_SCORED_XP);
    clamp_xp(base + tier.bonus() as f64)
}

/// Shells as a step function of final XP.
pub fn shells_for_xp(xp: u32) -> u32 {
    match xp {
        50.. => 4,
        35..=49 => 3,
        20..=34 => 2,
        _ => 1,
    }
}

/// How shells are derived for a claim. One policy per pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellPolicy {
    /// Step function of the final XP
    #[default]
    ScoreStep,
    /// The fixed `reward_shells` printed on the mission
    MissionFaceValue,
}

impl ShellPolicy {
    pub fn shells(self, xp: u32, mission: &Mission) -> u32 {
        match self {
            ShellPolicy::ScoreStep => shells_for_xp(xp),
            ShellPolicy::MissionFaceValue => mission.reward_shells,
        }
    }
}

/// Where a reward's XP came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum RewardSource {
    /// Short-circuited before scoring
    Guardrail(GuardrailHit),
    /// Scored remotely
    Scored,
    /// Scorer replied with missing or mistyped fields
    Defaulted,
    /// Scorer unavailable, timed out or rejected the request
    Fallback,
}

/// A finalized reward, ready to become a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub shells: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub source: RewardSource,
}

impl Reward {
    /// Fixed reward for a reflection stopped by the guardrail.
    pub fn guardrail(hit: GuardrailHit, mission: &Mission, policy: ShellPolicy) -> Self {
        Self {
            xp: MIN_XP,
            shells: policy.shells(MIN_XP, mission),
            note: Some(GUARDRAIL_NOTE.to_string()),
            source: RewardSource::Guardrail(hit),
        }
    }

    /// Guaranteed minimum when scoring failed.
    pub fn minimal(mission: &Mission, policy: ShellPolicy) -> Self {
        Self {
            xp: MIN_XP,
            shells: policy.shells(MIN_XP, mission),
            note: None,
            source: RewardSource::Fallback,
        }
    }

    /// Reward from a scorer reply. Missing fields fall back to defaults and
    /// mark the reward as `Defaulted`.
    pub fn scored(
        raw_xp: Option<f64>,
        note: Option<String>,
        mission: &Mission,
        policy: ShellPolicy,
    ) -> Self {
        let complete = raw_xp.is_some_and(f64::is_finite) && note.is_some();
        let xp = finalize_scored_xp(raw_xp, mission.tier);
        Self {
            xp,
            shells: policy.shells(xp, mission),
            note: Some(note.unwrap_or_else(|| DEFAULT_NOTE.to_string())),
            source: if complete {
                RewardSource::Scored
            } else {
                RewardSource::Defaulted
            },
        }
    }
}
