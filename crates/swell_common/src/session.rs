//! Claim session: today's content, the progression ledger and the reward
//! pipeline for one user.
//!
//! Flow for a claim:
//!
//! ```text
//! Idle -> start_claim
//!   requires reflection -> CollectingReflection -> confirm_reflection -> apply
//!   otherwise                                                          -> apply
//! apply: pipeline.evaluate -> record_entry (locks the mission for the day)
//! ```
//!
//! Nothing is written until the reward is decided. If the future returned by
//! `confirm_reflection` or `claim` is dropped while the scorer is pending,
//! the mission stays unclaimed.

use serde::Serialize;
use swell_shared::coach::{coach_line, quick_suggestion};
use swell_shared::unlocks::{Milestone, MILESTONES};
use swell_shared::{
    generate_daily, DailyContent, DayKey, Entry, Focus, LedgerStore, LevelMeta, MemoryLedger,
    Mission, ProgressionSnapshot, ProgressionState, Reward, UnlockSet,
};
use tracing::{debug, info};

use crate::pipeline::RewardPipeline;

/// Where the session is in the claim flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimPhase {
    Idle,
    /// Waiting for the user to describe what they did
    CollectingReflection(Mission),
}

/// Result of applying a reward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    pub entry: Entry,
    pub reward: Reward,
    /// False when the mission was already claimed today and nothing changed
    pub recorded: bool,
    /// New level, when this claim crossed a threshold
    pub level_up: Option<LevelMeta>,
    pub new_unlocks: Vec<&'static str>,
}

/// Result of tapping a mission card.
#[derive(Debug, Clone)]
pub enum ClaimStart {
    UnknownMission,
    AlreadyClaimed,
    NeedsReflection(Mission),
    Applied(ClaimOutcome),
}

pub struct Session<S: LedgerStore = MemoryLedger> {
    pipeline: RewardPipeline,
    progression: ProgressionState<S>,
    content: DailyContent,
    phase: ClaimPhase,
}

impl Session<MemoryLedger> {
    pub fn new(pipeline: RewardPipeline, today: DayKey, focus: Focus) -> Self {
        Self::with_store(pipeline, MemoryLedger::new(), today, focus)
    }
}

impl<S: LedgerStore> Session<S> {
    pub fn with_store(pipeline: RewardPipeline, store: S, today: DayKey, focus: Focus) -> Self {
        Self {
            pipeline,
            progression: ProgressionState::with_store(store),
            content: generate_daily(today, focus),
            phase: ClaimPhase::Idle,
        }
    }

    pub fn today(&self) -> DayKey {
        self.content.date
    }

    pub fn focus(&self) -> Focus {
        self.content.focus
    }

    pub fn content(&self) -> &DailyContent {
        &self.content
    }

    pub fn missions(&self) -> &[Mission] {
        &self.content.missions
    }

    pub fn phase(&self) -> &ClaimPhase {
        &self.phase
    }

    pub fn progression(&self) -> &ProgressionState<S> {
        &self.progression
    }

    pub fn pipeline(&self) -> &RewardPipeline {
        &self.pipeline
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.content = generate_daily(self.today(), focus);
    }

    /// Move the session to a new calendar day. Any pending reflection is dropped.
    pub fn roll_to(&mut self, today: DayKey) {
        if today != self.today() {
            debug!(from = %self.today(), to = %today, "Rolling session to new day");
            self.content = generate_daily(today, self.focus());
            self.phase = ClaimPhase::Idle;
        }
    }

    pub fn is_claimed(&self, mission_id: &str) -> bool {
        self.progression.is_claimed(self.today(), mission_id)
    }

    /// Tap on a mission card.
    pub async fn start_claim(&mut self, mission_id: &str) -> ClaimStart {
        let Some(mission) = self.content.mission(mission_id).cloned() else {
            return ClaimStart::UnknownMission;
        };
        if self.is_claimed(&mission.id) {
            return ClaimStart::AlreadyClaimed;
        }
        if mission.requires_reflection {
            self.phase = ClaimPhase::CollectingReflection(mission.clone());
            return ClaimStart::NeedsReflection(mission);
        }
        ClaimStart::Applied(self.apply(&mission, "").await)
    }

    /// Submit the reflection for the pending mission. `None` if nothing is pending.
    pub async fn confirm_reflection(&mut self, reflection: &str) -> Option<ClaimOutcome> {
        let ClaimPhase::CollectingReflection(mission) =
            std::mem::replace(&mut self.phase, ClaimPhase::Idle)
        else {
            return None;
        };
        Some(self.apply(&mission, reflection).await)
    }

    pub fn cancel_reflection(&mut self) {
        self.phase = ClaimPhase::Idle;
    }

    /// Claim in one step. Missions that do not ask for a reflection ignore
    /// `reflection`.
    pub async fn claim(&mut self, mission_id: &str, reflection: &str) -> ClaimStart {
        let Some(mission) = self.content.mission(mission_id).cloned() else {
            return ClaimStart::UnknownMission;
        };
        if self.is_claimed(&mission.id) {
            return ClaimStart::AlreadyClaimed;
        }
        let reflection = if mission.requires_reflection { reflection } else { "" };
        ClaimStart::Applied(self.apply(&mission, reflection).await)
    }

    async fn apply(&mut self, mission: &Mission, reflection: &str) -> ClaimOutcome {
        let today = self.today();
        let level_before = self.progression.level();
        let unlocks_before = self.progression.unlocks();
        let streak = self.progression.streaks(today).current;

        let reward = self
            .pipeline
            .evaluate(mission, reflection, self.progression.total_xp(), streak)
            .await;

        let entry = Entry::new(today, self.focus(), &mission.id, reward.xp, reward.shells)
            .with_reflection(reflection)
            .with_note(reward.note.clone());
        let recorded = self.progression.record_entry(entry.clone());

        if recorded {
            info!(entry = %entry.id, xp = entry.xp, shells = entry.shells, "Entry recorded");
        } else {
            debug!(mission = %mission.id, "Duplicate claim ignored");
        }

        let level_after = self.progression.level();
        ClaimOutcome {
            entry,
            reward,
            recorded,
            level_up: (level_after.level > level_before.level).then_some(level_after),
            new_unlocks: self.progression.unlocks().gained_since(&unlocks_before),
        }
    }

    // ------------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------------

    pub fn level(&self) -> LevelMeta {
        self.progression.level()
    }

    pub fn unlocks(&self) -> UnlockSet {
        self.progression.unlocks()
    }

    pub fn streak(&self) -> u32 {
        self.progression.streaks(self.today()).current
    }

    pub fn longest_streak(&self) -> u32 {
        self.progression.streaks(self.today()).longest
    }

    pub fn missions_completed(&self) -> usize {
        self.progression
            .missions_completed(&self.content.missions, self.today())
    }

    /// Milestones with whether each is reached.
    pub fn milestones(&self) -> Vec<(Milestone, bool)> {
        let total = self.progression.total_xp();
        MILESTONES.iter().map(|m| (*m, m.reached(total))).collect()
    }

    pub fn coach_line(&self) -> &'static str {
        coach_line(
            self.progression.total_xp(),
            self.streak(),
            self.focus(),
            self.progression.total_shells(),
        )
    }

    pub fn quick_suggestion(&self) -> &'static str {
        quick_suggestion(self.focus())
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        self.progression.snapshot(self.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::FakeScorer;
    use swell_shared::ShellPolicy;

    fn session(fake: &FakeScorer) -> Session {
        let pipeline = RewardPipeline::new(Box::new(fake.clone()), ShellPolicy::ScoreStep);
        Session::new(pipeline, DayKey::from_ymd(2024, 1, 1).unwrap(), Focus::Stress)
    }

    #[tokio::test]
    async fn test_cancel_leaves_mission_unclaimed() {
        let fake = FakeScorer::replying(30.0, "ok");
        let mut session = session(&fake);
        let core_id = session.missions()[0].id.clone();

        assert!(matches!(
            session.start_claim(&core_id).await,
            ClaimStart::NeedsReflection(_)
        ));
        session.cancel_reflection();
        assert_eq!(session.phase(), &ClaimPhase::Idle);
        assert!(!session.is_claimed(&core_id));
        assert!(session.confirm_reflection("too late").await.is_none());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_roll_to_new_day_regenerates_missions() {
        let fake = FakeScorer::replying(30.0, "ok");
        let mut session = session(&fake);
        let before = session.missions()[0].id.clone();
        session.roll_to(DayKey::from_ymd(2024, 1, 2).unwrap());
        assert_ne!(session.missions()[0].id, before);
        assert_eq!(session.today().to_string(), "2024-01-02");
    }
}
