//! Command dispatch

use anyhow::{Context, Result};
use serde::Serialize;
use swell_common::{RewardPipeline, Session, SwellConfig};
use swell_shared::content::mission_for;
use swell_shared::{compute_level, compute_unlocks, generate_daily, DayKey, Focus, Tier};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::{output, repl};

pub async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Today { date, focus } => {
            let focus = match focus {
                Some(focus) => focus,
                None => SwellConfig::load()?.session.focus,
            };
            today(date.unwrap_or_else(DayKey::today), focus, json)
        }
        Commands::Level { xp } => {
            let meta = compute_level(xp);
            emit(json, &meta, || output::render_level(&meta))
        }
        Commands::Unlocks { xp, shells } => {
            let set = compute_unlocks(xp, shells);
            emit(json, &set, || output::render_unlocks(&set))
        }
        Commands::Score {
            tier,
            mission,
            reflection,
            xp,
            streak,
        } => score(tier, &mission, &reflection, xp, streak, json).await,
        Commands::Session { focus, date } => session(focus, date).await,
        Commands::Config => {
            let config = SwellConfig::load()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Print `value` as JSON or the rendered text.
fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render());
    }
    Ok(())
}

fn today(date: DayKey, focus: Focus, json: bool) -> Result<()> {
    let content = generate_daily(date, focus);
    emit(json, &content, || output::render_content(&content, |_| false))
}

async fn score(
    tier: Tier,
    label: &str,
    reflection: &str,
    current_xp: u64,
    streak: u32,
    json: bool,
) -> Result<()> {
    let config = SwellConfig::load()?;
    let pipeline =
        RewardPipeline::from_config(&config).context("Failed to build the scoring client")?;
    debug!(scorer = pipeline.scorer_name(), "Scoring one reflection");

    let mission = mission_for(DayKey::today(), tier, label);
    let reward = pipeline
        .evaluate(&mission, reflection, current_xp, streak)
        .await;
    emit(json, &reward, || output::render_reward(&reward))
}

async fn session(focus: Option<Focus>, date: Option<DayKey>) -> Result<()> {
    let config = SwellConfig::load()?;
    let pipeline =
        RewardPipeline::from_config(&config).context("Failed to build the scoring client")?;
    let focus = focus.unwrap_or(config.session.focus);

    let mut session = Session::new(pipeline, date.unwrap_or_else(DayKey::today), focus);
    repl::run(&mut session, date.is_none()).await
}
