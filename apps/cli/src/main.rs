//! `bulwark` binary: first response for compromised instances and credentials.

mod cli;
mod commands;
mod config;
mod event;

use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.log = config.log.with_format(format);
    }
    if let Some(level) = cli.log_level {
        config.log = config.log.with_level(level);
    }

    let _log_guard =
        bulwark_log::init_with(config.log.clone()).context("failed to initialize logging")?;

    match cli.command {
        Commands::Respond(args) => commands::respond(config, args).await,
        Commands::Plan(args) => commands::plan(&args),
    }
}
