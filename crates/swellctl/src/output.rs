//! Terminal rendering for swellctl.
//!
//! ASCII only. Every `render_*` returns the text so it can be tested; the
//! command layer decides where it goes.

use owo_colors::OwoColorize;
use swell_common::ClaimOutcome;
use swell_shared::unlocks::{next_milestone, Milestone};
use swell_shared::{DailyContent, Entry, LevelMeta, Reward, RewardSource, Tier, UnlockSet};

pub const SEPARATOR: &str = "------------------------------------------------------------";

const BAR_WIDTH: usize = 24;

/// `[########------]` style bar for a 0.0-1.0 fraction.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn tier_tag(tier: Tier) -> String {
    let tag = format!("[{}]", tier.label().to_uppercase());
    match tier {
        Tier::Easy => tag.green().to_string(),
        Tier::Core => tag.cyan().to_string(),
        Tier::Stretch => tag.magenta().to_string(),
    }
}

/// Prompt and mission cards. `claimed` tells which card ids are done.
pub fn render_content<F>(content: &DailyContent, claimed: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut out = String::new();
    out.push_str(&format!(
        "{}  focus: {}\n",
        content.date.to_string().bold(),
        content.focus.label()
    ));
    out.push_str(&format!("{}\n", SEPARATOR.dimmed()));
    out.push_str(&format!("{}\n\n", content.prompt.italic()));

    for (i, mission) in content.missions.iter().enumerate() {
        let mark = if claimed(&mission.id) {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        out.push_str(&format!(
            "  {} {}. {} {}\n",
            mark,
            i + 1,
            tier_tag(mission.tier),
            mission.label
        ));
        out.push_str(&format!(
            "        +{} XP  +{} shells{}\n",
            mission.xp,
            mission.reward_shells,
            if mission.requires_reflection {
                "  (reflection)"
            } else {
                ""
            }
        ));
    }
    out
}

pub fn render_level(meta: &LevelMeta) -> String {
    format!(
        "Level {} {}  {} {}%\n{} XP total, {} to go (next at {})\n",
        meta.level,
        meta.label.bold(),
        progress_bar(meta.progress, BAR_WIDTH),
        meta.percent(),
        meta.current_xp,
        meta.xp_to_next(),
        meta.next_level_xp
    )
}

pub fn render_unlocks(set: &UnlockSet) -> String {
    if set.is_empty() {
        return "Unlocked: none\n".to_string();
    }
    format!(
        "Unlocked ({}): {}\n",
        set.len(),
        set.in_display_order().join(", ").cyan()
    )
}

/// Ledger entries, most recent first, with the reflection quoted.
pub fn render_history(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "Your next real moment will land here.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{} - {} - +{} XP - +{} shells\n",
            entry.date.to_string().bold(),
            entry.focus.label(),
            entry.xp,
            entry.shells
        ));
        if let Some(reflection) = &entry.reflection {
            out.push_str(&format!("  \"{}\"\n", reflection));
        }
        if let Some(note) = &entry.note {
            out.push_str(&format!("  {}\n", note.dimmed()));
        }
    }
    out
}

/// Next milestone line plus the full strip.
pub fn render_milestones(milestones: &[(Milestone, bool)], total_xp: u64) -> String {
    let mut out = String::new();
    match next_milestone(total_xp) {
        Some(next) => out.push_str(&format!("{}\n", next.status_line(total_xp))),
        None => out.push_str("Every milestone is part of your beach.\n"),
    }
    for (milestone, reached) in milestones {
        let mark = if *reached {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        out.push_str(&format!("  {} {:>4} XP  {}\n", mark, milestone.xp, milestone.label));
    }
    out
}

fn source_tag(source: &RewardSource) -> String {
    match source {
        RewardSource::Scored => "[SCORED]".green().to_string(),
        RewardSource::Defaulted => "[DEFAULTED]".yellow().to_string(),
        RewardSource::Fallback => "[FALLBACK]".yellow().to_string(),
        RewardSource::Guardrail(_) => "[GUARDRAIL]".bright_red().to_string(),
    }
}

pub fn render_reward(reward: &Reward) -> String {
    let mut out = format!(
        "{} +{} XP  +{} shells\n",
        source_tag(&reward.source),
        reward.xp,
        reward.shells
    );
    if let Some(note) = &reward.note {
        out.push_str(&format!("  {}\n", note));
    }
    out
}

pub fn render_outcome(outcome: &ClaimOutcome) -> String {
    if !outcome.recorded {
        return format!("[NOTE] {} was already claimed today.\n", outcome.entry.mission_id);
    }
    let mut out = render_reward(&outcome.reward);
    if let Some(level) = &outcome.level_up {
        out.push_str(&format!(
            "{} Level {} - {}\n",
            "[LEVEL UP]".bright_green(),
            level.level,
            level.label
        ));
    }
    if !outcome.new_unlocks.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            "[UNLOCKED]".bright_cyan(),
            outcome.new_unlocks.join(", ")
        ));
    }
    out
}

pub fn render_status(
    meta: &LevelMeta,
    total_shells: u64,
    streak: u32,
    longest: u32,
    completed: usize,
) -> String {
    let mut out = render_level(meta);
    out.push_str(&format!(
        "Shells: {}  Streak: {} (best {})  Today: {}/3\n",
        total_shells, streak, longest, completed
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(7.0, 4), "[####]");
        assert_eq!(progress_bar(-1.0, 4), "[----]");
    }
}
