//! REPL - interactive claim session
//!
//! Reads commands from stdin line by line. While a mission waits for its
//! reflection, every line except a bare `cancel` or `quit` is the reflection.

use anyhow::Result;
use swell_common::{ClaimPhase, ClaimStart, Session};
use swell_shared::{DayKey, Focus, LedgerStore};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::output;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    /// 1-based card number, optional inline reflection
    Claim {
        card: usize,
        reflection: Option<String>,
    },
    Reflect(String),
    Cancel,
    Missions,
    Status,
    Coach,
    Tip,
    Milestones,
    History,
    Snapshot,
    Focus(Focus),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "claim" | "c" => match rest.split_once(char::is_whitespace) {
            Some((n, text)) => match n.parse() {
                Ok(card) => ReplCommand::Claim {
                    card,
                    reflection: Some(text.trim().to_string()),
                },
                Err(_) => ReplCommand::Unknown(line.to_string()),
            },
            None => match rest.parse() {
                Ok(card) => ReplCommand::Claim {
                    card,
                    reflection: None,
                },
                Err(_) => ReplCommand::Unknown(line.to_string()),
            },
        },
        "reflect" | "r" if !rest.is_empty() => ReplCommand::Reflect(rest.to_string()),
        "focus" => match rest.parse() {
            Ok(focus) => ReplCommand::Focus(focus),
            Err(_) => ReplCommand::Unknown(line.to_string()),
        },
        // Everything below takes no arguments
        _ if !rest.is_empty() => ReplCommand::Unknown(line.to_string()),
        "cancel" => ReplCommand::Cancel,
        "missions" | "today" | "m" => ReplCommand::Missions,
        "status" | "s" => ReplCommand::Status,
        "coach" => ReplCommand::Coach,
        "tip" => ReplCommand::Tip,
        "milestones" => ReplCommand::Milestones,
        "history" | "h" => ReplCommand::History,
        "snapshot" => ReplCommand::Snapshot,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Parse a line given whether a reflection is pending. While pending, only a
/// bare `cancel`/`quit` (or an explicit `reflect <text>`) is read as a command.
pub fn parse_input(line: &str, reflection_pending: bool) -> ReplCommand {
    if !reflection_pending {
        return parse_command(line);
    }
    match parse_command(line) {
        command @ (ReplCommand::Empty
        | ReplCommand::Cancel
        | ReplCommand::Quit
        | ReplCommand::Reflect(_)) => command,
        _ => ReplCommand::Reflect(line.trim().to_string()),
    }
}

const HELP: &str = "\
Commands:
  claim <n> [reflection]   claim card n, optionally with the reflection inline
  reflect <text>           answer the pending reflection
  cancel                   drop the pending reflection
  missions                 show today's cards
  status                   level, shells and streak
  coach | tip              a line from the coach
  milestones               next unlocks on the shore
  history                  recent progress, newest first
  snapshot                 progression totals as JSON
  focus <area>             relationships, stress or performance
  quit
";

/// Run one command against the session. Returns false when the loop should stop.
pub async fn handle<S: LedgerStore>(
    session: &mut Session<S>,
    command: ReplCommand,
) -> (bool, String) {
    let text = match command {
        ReplCommand::Empty => String::new(),
        ReplCommand::Quit => return (false, String::new()),
        ReplCommand::Help => HELP.to_string(),
        ReplCommand::Missions => {
            output::render_content(session.content(), |id| session.is_claimed(id))
        }
        ReplCommand::Status => output::render_status(
            &session.level(),
            session.progression().total_shells(),
            session.streak(),
            session.longest_streak(),
            session.missions_completed(),
        ) + &output::render_unlocks(&session.unlocks()),
        ReplCommand::Coach => format!("{}\n", session.coach_line()),
        ReplCommand::Tip => format!("{}\n", session.quick_suggestion()),
        ReplCommand::Milestones => output::render_milestones(
            &session.milestones(),
            session.progression().total_xp(),
        ),
        ReplCommand::History => output::render_history(session.progression().entries()),
        ReplCommand::Snapshot => match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => json + "\n",
            Err(e) => format!("[ERROR] {}\n", e),
        },
        ReplCommand::Focus(focus) => {
            session.set_focus(focus);
            format!("Focus set to {}.\n", focus.label())
        }
        ReplCommand::Cancel => {
            session.cancel_reflection();
            "Reflection dropped. The mission is still open.\n".to_string()
        }
        ReplCommand::Claim { card, reflection } => claim(session, card, reflection).await,
        ReplCommand::Reflect(text) => reflect(session, &text).await,
        ReplCommand::Unknown(line) => {
            if matches!(session.phase(), ClaimPhase::CollectingReflection(_)) {
                reflect(session, &line).await
            } else {
                format!("Unknown command: {} (try 'help')\n", line)
            }
        }
    };
    (true, text)
}

async fn claim<S: LedgerStore>(
    session: &mut Session<S>,
    card: usize,
    reflection: Option<String>,
) -> String {
    let Some(mission_id) = card
        .checked_sub(1)
        .and_then(|i| session.missions().get(i))
        .map(|m| m.id.clone())
    else {
        return format!("No card {}. Pick 1-{}.\n", card, session.missions().len());
    };

    match (session.start_claim(&mission_id).await, reflection) {
        (ClaimStart::UnknownMission, _) => format!("Unknown mission {}.\n", mission_id),
        (ClaimStart::AlreadyClaimed, _) => "Already claimed today.\n".to_string(),
        (ClaimStart::Applied(outcome), _) => output::render_outcome(&outcome),
        (ClaimStart::NeedsReflection(_), Some(text)) => reflect(session, &text).await,
        (ClaimStart::NeedsReflection(mission), None) => {
            format!("{}\nWhat did you actually do?\n", mission.label)
        }
    }
}

async fn reflect<S: LedgerStore>(session: &mut Session<S>, text: &str) -> String {
    match session.confirm_reflection(text).await {
        Some(outcome) => output::render_outcome(&outcome),
        None => "Nothing is waiting for a reflection. Use 'claim <n>' first.\n".to_string(),
    }
}

/// Interactive loop over stdin until `quit` or end of input. With
/// `follow_clock` the session rolls over when the UTC day changes.
pub async fn run<S: LedgerStore>(session: &mut Session<S>, follow_clock: bool) -> Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    let banner = format!(
        "Swell Getaway session ({} scorer). Type 'help' for commands.\n\n{}",
        session.pipeline().scorer_name(),
        output::render_content(session.content(), |id| session.is_claimed(id))
    );
    stdout.write_all(banner.as_bytes()).await?;

    loop {
        stdout.write_all(b"swell> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if follow_clock {
            session.roll_to(DayKey::today());
        }
        let pending = matches!(session.phase(), ClaimPhase::CollectingReflection(_));
        let (keep_going, text) = handle(session, parse_input(&line, pending)).await;
        stdout.write_all(text.as_bytes()).await?;
        if !keep_going {
            break;
        }
    }

    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim_with_inline_reflection() {
        assert_eq!(
            parse_command("claim 3 asked my lead what done means"),
            ReplCommand::Claim {
                card: 3,
                reflection: Some("asked my lead what done means".into())
            }
        );
        assert_eq!(
            parse_command("  c 2 "),
            ReplCommand::Claim {
                card: 2,
                reflection: None
            }
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command(""), ReplCommand::Empty);
        assert_eq!(parse_command("QUIT"), ReplCommand::Quit);
        assert_eq!(parse_command("focus stress"), ReplCommand::Focus(Focus::Stress));
        assert_eq!(
            parse_command("claim two"),
            ReplCommand::Unknown("claim two".into())
        );
        assert_eq!(
            parse_command("I called my sister"),
            ReplCommand::Unknown("I called my sister".into())
        );
    }

    #[test]
    fn test_no_arg_commands_reject_trailing_text() {
        assert_eq!(
            parse_command("quit doomscrolling"),
            ReplCommand::Unknown("quit doomscrolling".into())
        );
        assert_eq!(
            parse_command("help my mum"),
            ReplCommand::Unknown("help my mum".into())
        );
        assert_eq!(parse_command("history"), ReplCommand::History);
    }

    #[test]
    fn test_pending_reflection_takes_command_words() {
        assert_eq!(
            parse_input("status update sent to my lead", true),
            ReplCommand::Reflect("status update sent to my lead".into())
        );
        assert_eq!(parse_input("coach", true), ReplCommand::Reflect("coach".into()));
        assert_eq!(parse_input(" cancel ", true), ReplCommand::Cancel);
        assert_eq!(parse_input("quit", true), ReplCommand::Quit);
        assert_eq!(parse_input("coach", false), ReplCommand::Coach);
    }
}
