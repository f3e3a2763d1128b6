//! Riff, the shoreline guide.
//!
//! Picks a one-line encouragement from the user's totals and streak, and a
//! small suggested move for the selected focus.

use crate::mission::Focus;

/// Encouragement line for the coach bubble.
pub fn coach_line(total_xp: u64, streak: u32, focus: Focus, total_shells: u64) -> &'static str {
    if streak >= 5 {
        return "You keep showing up. Let's use that for one conversation or moment that actually counts today.";
    }
    if total_xp == 0 {
        return "Start with one honest rep. I will remember it, even if no one else sees it.";
    }
    if total_xp < 60 {
        return "You have started. Choose one mission that feels doable and lock in one real moment.";
    }
    if total_shells >= 15 && total_xp > 120 {
        return "These shells are proof you are practicing, not just thinking about it. Let's keep it grounded.";
    }
    match focus {
        Focus::Stress => {
            "You are learning to stay steady when it is loud. Pick one spike to practice on today."
        }
        Focus::Performance => {
            "Your effort is real. Aim it at one thing that moves your week, not just your inbox."
        }
        Focus::Relationships => {
            "You care about your people. Choose one interaction to handle with a little more honesty and care."
        }
    }
}

/// "Give me one small move"
pub fn quick_suggestion(focus: Focus) -> &'static str {
    match focus {
        Focus::Stress => {
            "Pick one moment that usually spikes your stress and decide how you want to meet it today."
        }
        Focus::Performance => {
            "Choose one task that actually matters and give it five more seconds of attention than you usually would."
        }
        Focus::Relationships => {
            "Think of one person who deserves a softer version of you tonight and plan that message now."
        }
    }
}
