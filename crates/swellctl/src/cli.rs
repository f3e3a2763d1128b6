//! Command-line definition

use clap::{Parser, Subcommand};
use swell_shared::{DayKey, Focus, Tier};

#[derive(Parser, Debug)]
#[command(name = "swellctl")]
#[command(about = "Swell Getaway - daily missions, honest reflections, shoreline progression")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug logging (overridden by SWELL_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the prompt and missions for a day
    Today {
        /// Day to show (YYYY-MM-DD, UTC today if omitted)
        #[arg(long)]
        date: Option<DayKey>,

        /// Focus area (defaults to the configured one)
        #[arg(long)]
        focus: Option<Focus>,
    },

    /// Show the level reached at a given total XP
    Level { xp: u64 },

    /// Show unlocks for given totals
    Unlocks { xp: u64, shells: u64 },

    /// Run one reflection through the reward pipeline
    Score {
        #[arg(long)]
        tier: Tier,

        /// Mission text sent to the scorer
        #[arg(long)]
        mission: String,

        #[arg(long, default_value = "")]
        reflection: String,

        /// Current total XP
        #[arg(long, default_value_t = 0)]
        xp: u64,

        /// Current streak in days
        #[arg(long, default_value_t = 0)]
        streak: u32,
    },

    /// Start an interactive in-memory session
    Session {
        #[arg(long)]
        focus: Option<Focus>,

        /// Pretend today is this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<DayKey>,
    },

    /// Print the effective configuration
    Config,
}
