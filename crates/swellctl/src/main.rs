//! Swell Control - command-line front end for the Swell Getaway engine

use anyhow::Result;
use clap::Parser;
use swellctl::cli::Cli;
use swellctl::{commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    commands::run(cli).await
}
