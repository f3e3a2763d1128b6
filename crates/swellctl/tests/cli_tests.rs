//! CLI surface tests for swellctl
//!
//! Argument parsing through `Cli::try_parse_from` plus a few runs of the
//! built binary for the commands that need no config or network.

use clap::Parser;
use std::process::Command;
use swell_shared::{DayKey, Focus, Tier};
use swellctl::cli::{Cli, Commands};

fn swellctl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_swellctl"))
}

#[test]
fn test_parse_today_with_date_and_focus() {
    let cli = Cli::try_parse_from([
        "swellctl", "today", "--date", "2024-01-01", "--focus", "Stress",
    ])
    .unwrap();
    match cli.command {
        Commands::Today { date, focus } => {
            assert_eq!(date, DayKey::from_ymd(2024, 1, 1));
            assert_eq!(focus, Some(Focus::Stress));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_bad_date() {
    assert!(Cli::try_parse_from(["swellctl", "today", "--date", "2024-13-01"]).is_err());
    assert!(Cli::try_parse_from(["swellctl", "today", "--date", "yesterday"]).is_err());
}

#[test]
fn test_parse_score_defaults() {
    let cli = Cli::try_parse_from([
        "swellctl",
        "score",
        "--tier",
        "stretch",
        "--mission",
        "Ask one direct question",
    ])
    .unwrap();
    match cli.command {
        Commands::Score {
            tier,
            mission,
            reflection,
            xp,
            streak,
        } => {
            assert_eq!(tier, Tier::Stretch);
            assert_eq!(mission, "Ask one direct question");
            assert_eq!(reflection, "");
            assert_eq!(xp, 0);
            assert_eq!(streak, 0);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["swellctl", "level", "60", "--json", "-v"]).unwrap();
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_parse_unknown_tier_fails() {
    let parsed = Cli::try_parse_from(["swellctl", "score", "--tier", "epic", "--mission", "x"]);
    assert!(parsed.is_err());
}

#[test]
fn test_binary_level_json() {
    let output = swellctl().args(["level", "60", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["level"], 1);
    assert_eq!(value["label"], "Settling In");
    assert_eq!(value["nextLevelXp"], 140);
}

#[test]
fn test_binary_today_json_is_deterministic() {
    let run = || {
        swellctl()
            .args(["today", "--date", "2024-01-01", "--focus", "performance", "--json"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(value["date"], "2024-01-01");
    assert_eq!(
        value["prompt"],
        "Name one thing that is in your control and act on it."
    );
    assert_eq!(value["missions"][0]["id"], "2024-01-01-core-1");
    assert_eq!(value["missions"][2]["tier"], "stretch");
}

#[test]
fn test_binary_unlocks_text() {
    let output = swellctl().args(["unlocks", "130", "12"]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Unlocked (6)"), "{}", text);
    assert!(text.contains("dock"));
    assert!(text.contains("reef"));
    assert!(!text.contains("lighthouse"));
}
