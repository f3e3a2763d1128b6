//! Reward scoring pipeline.
//!
//! Turns a claimed mission plus reflection into a finalized `Reward`:
//!
//! 1. Guardrail check (sync). Low-effort answers get the fixed minimum and
//!    the scorer is never called.
//! 2. One scorer call, no retry.
//! 3. Tier bonus on the scored value, clamp to `[10, 60]`.
//! 4. Shells from the configured `ShellPolicy`.
//!
//! `evaluate` never fails. A scorer error of any kind degrades to the
//! minimal reward.

use swell_shared::reward::guardrail;
use swell_shared::{Mission, Reward, ShellPolicy};
use tracing::{debug, info, warn};

use crate::config::SwellConfig;
use crate::scorer::{build_scorer, ScoreRequest, Scorer, ScorerError};

pub struct RewardPipeline {
    scorer: Box<dyn Scorer>,
    policy: ShellPolicy,
}

impl RewardPipeline {
    pub fn new(scorer: Box<dyn Scorer>, policy: ShellPolicy) -> Self {
        Self { scorer, policy }
    }

    pub fn from_config(config: &SwellConfig) -> Result<Self, ScorerError> {
        Ok(Self::new(build_scorer(config)?, config.rewards.shell_policy))
    }

    pub fn policy(&self) -> ShellPolicy {
        self.policy
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Decide the reward for one claim.
    pub async fn evaluate(
        &self,
        mission: &Mission,
        reflection: &str,
        current_xp: u64,
        streak: u32,
    ) -> Reward {
        if let Some(hit) = guardrail(reflection) {
            debug!(mission = %mission.id, ?hit, "Guardrail short-circuit");
            return Reward::guardrail(hit, mission, self.policy);
        }

        let request = ScoreRequest::new(mission, reflection, current_xp, streak);
        let reward = match self.scorer.score(&request).await {
            Ok(reply) => {
                if !reply.is_complete() {
                    warn!(
                        mission = %mission.id,
                        ?reply,
                        "Scorer reply missing fields, using defaults"
                    );
                }
                Reward::scored(reply.xp, reply.note, mission, self.policy)
            }
            Err(ScorerError::Validation(msg)) => {
                warn!(mission = %mission.id, %msg, "Scoring request rejected");
                Reward::minimal(mission, self.policy)
            }
            Err(e) => {
                warn!(
                    mission = %mission.id,
                    scorer = self.scorer.name(),
                    error = %e,
                    "Scorer failed, granting minimal reward"
                );
                Reward::minimal(mission, self.policy)
            }
        };

        info!(
            mission = %mission.id,
            tier = %mission.tier,
            xp = reward.xp,
            shells = reward.shells,
            "Reward decided"
        );
        reward
    }
}
