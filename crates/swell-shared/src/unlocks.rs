//! Cosmetic unlocks and XP milestones.
//!
//! Unlocks are independent threshold rules over total XP and total shells.
//! Both metrics only grow, so an unlocked token never goes away.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Xp,
    Shells,
}

#[derive(Debug, Clone, Copy)]
pub struct UnlockRule {
    pub metric: Metric,
    pub threshold: u64,
    pub token: &'static str,
}

const fn rule(metric: Metric, threshold: u64, token: &'static str) -> UnlockRule {
    UnlockRule { metric, threshold, token }
}

/// All unlock rules. Order is display order only.
pub const UNLOCK_RULES: &[UnlockRule] = &[
    rule(Metric::Xp, 0, "shore"),
    rule(Metric::Xp, 20, "towel"),
    rule(Metric::Xp, 60, "palms"),
    rule(Metric::Xp, 120, "dock"),
    rule(Metric::Xp, 220, "lighthouse"),
    rule(Metric::Shells, 6, "coral"),
    rule(Metric::Shells, 12, "reef"),
    rule(Metric::Shells, 20, "fish"),
    rule(Metric::Shells, 30, "campfire"),
];

impl UnlockRule {
    pub fn is_met(&self, total_xp: u64, total_shells: u64) -> bool {
        let value = match self.metric {
            Metric::Xp => total_xp,
            Metric::Shells => total_shells,
        };
        value >= self.threshold
    }
}

/// Set of unlocked cosmetic tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnlockSet(BTreeSet<&'static str>);

impl UnlockSet {
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens in rule (display) order.
    pub fn in_display_order(&self) -> Vec<&'static str> {
        UNLOCK_RULES
            .iter()
            .map(|r| r.token)
            .filter(|t| self.0.contains(t))
            .collect()
    }

    /// Tokens present in `self` but not in `earlier`, in display order.
    pub fn gained_since(&self, earlier: &UnlockSet) -> Vec<&'static str> {
        self.in_display_order()
            .into_iter()
            .filter(|t| !earlier.contains(t))
            .collect()
    }
}

/// Evaluate every rule against the totals.
pub fn compute_unlocks(total_xp: u64, total_shells: u64) -> UnlockSet {
    UnlockSet(
        UNLOCK_RULES
            .iter()
            .filter(|r| r.is_met(total_xp, total_shells))
            .map(|r| r.token)
            .collect(),
    )
}

// ============================================================================
// Milestones
// ============================================================================

/// XP milestone shown in the "Next unlocks" strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub xp: u64,
    pub label: &'static str,
}

pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        xp: 50,
        label: "Towel and shade",
    },
    Milestone {
        xp: 120,
        label: "Dock on the water",
    },
    Milestone {
        xp: 220,
        label: "Palms and quiet cove",
    },
    Milestone {
        xp: 360,
        label: "Lighthouse marker",
    },
    Milestone {
        xp: 520,
        label: "Night fire and reef",
    },
];

impl Milestone {
    pub fn reached(&self, total_xp: u64) -> bool {
        total_xp >= self.xp
    }

    pub fn remaining(&self, total_xp: u64) -> u64 {
        self.xp.saturating_sub(total_xp)
    }

    /// One-line status, e.g. "Earn 30 more XP to unlock Dock on the water."
    pub fn status_line(&self, total_xp: u64) -> String {
        if self.reached(total_xp) {
            format!("{} is already part of your beach experience.", self.label)
        } else {
            format!(
                "Earn {} more XP to unlock {}.",
                self.remaining(total_xp),
                self.label
            )
        }
    }
}

/// First milestone not yet reached.
pub fn next_milestone(total_xp: u64) -> Option<Milestone> {
    MILESTONES.iter().copied().find(|m| !m.reached(total_xp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shore_always_unlocked() {
        let set = compute_unlocks(0, 0);
        assert_eq!(set.in_display_order(), vec!["shore"]);
    }

    #[test]
    fn test_metrics_are_independent() {
        let set = compute_unlocks(0, 30);
        assert!(set.contains("campfire"));
        assert!(set.contains("coral"));
        assert!(!set.contains("towel"));
    }

    #[test]
    fn test_gained_since() {
        let before = compute_unlocks(19, 5);
        let after = compute_unlocks(61, 6);
        assert_eq!(after.gained_since(&before), vec!["towel", "palms", "coral"]);
    }

    #[test]
    fn test_milestone_status() {
        let dock = MILESTONES[1];
        assert_eq!(dock.remaining(90), 30);
        assert_eq!(
            dock.status_line(90),
            "Earn 30 more XP to unlock Dock on the water."
        );
        assert!(dock.reached(120));
        assert_eq!(next_milestone(120).map(|m| m.xp), Some(220));
        assert_eq!(next_milestone(600), None);
    }
}
