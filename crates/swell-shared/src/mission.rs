//! Missions, tiers and focus areas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SwellError;

/// Thematic tag a user can pick on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Relationships,
    Stress,
    Performance,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Relationships, Focus::Stress, Focus::Performance];

    pub fn as_str(self) -> &'static str {
        match self {
            Focus::Relationships => "relationships",
            Focus::Stress => "stress",
            Focus::Performance => "performance",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Focus::Relationships => "Relationships",
            Focus::Stress => "Stress",
            Focus::Performance => "Performance",
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Focus {
    type Err = SwellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relationships" => Ok(Focus::Relationships),
            "stress" => Ok(Focus::Stress),
            "performance" => Ok(Focus::Performance),
            _ => Err(SwellError::UnknownFocus(s.to_string())),
        }
    }
}

/// Mission difficulty class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Core,
    Stretch,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Core => "core",
            Tier::Stretch => "stretch",
        }
    }

    /// Label shown on the mission card
    pub fn label(self) -> &'static str {
        match self {
            Tier::Easy => "Low friction",
            Tier::Core => "Core rep",
            Tier::Stretch => "Stretch",
        }
    }

    /// XP added on top of a remotely scored reflection.
    pub fn bonus(self) -> i64 {
        match self {
            Tier::Easy => 0,
            Tier::Core => 2,
            Tier::Stretch => 4,
        }
    }

    /// Easy reps are claimed with a tap; core and stretch ask what you did.
    pub fn requires_reflection(self) -> bool {
        !matches!(self, Tier::Easy)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = SwellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "core" => Ok(Tier::Core),
            "stretch" => Ok(Tier::Stretch),
            _ => Err(SwellError::UnknownTier(s.to_string())),
        }
    }
}

/// One of today's missions.
///
/// `xp` and `reward_shells` are face values shown on the card before the
/// claim; the granted reward is decided by the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub label: String,
    pub xp: u32,
    pub tier: Tier,
    pub reward_shells: u32,
    pub requires_reflection: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_parse_case_insensitive() {
        assert_eq!("Stress".parse::<Focus>().unwrap(), Focus::Stress);
        assert_eq!(" PERFORMANCE ".parse::<Focus>().unwrap(), Focus::Performance);
        assert!(matches!(
            "sleep".parse::<Focus>(),
            Err(SwellError::UnknownFocus(_))
        ));
    }

    #[test]
    fn test_tier_bonus_and_reflection_policy() {
        assert_eq!(Tier::Stretch.bonus(), 4);
        assert_eq!(Tier::Core.bonus(), 2);
        assert_eq!(Tier::Easy.bonus(), 0);
        assert!(!Tier::Easy.requires_reflection());
        assert!(Tier::Core.requires_reflection());
        assert!(Tier::Stretch.requires_reflection());
    }

    #[test]
    fn test_mission_wire_names() {
        let mission = Mission {
            id: "2024-01-01-core-1".into(),
            label: "x".into(),
            xp: 18,
            tier: Tier::Core,
            reward_shells: 2,
            requires_reflection: true,
        };
        let json = serde_json::to_value(&mission).unwrap();
        assert_eq!(json["rewardShells"], 2);
        assert_eq!(json["requiresReflection"], true);
        assert_eq!(json["tier"], "core");
    }
}
