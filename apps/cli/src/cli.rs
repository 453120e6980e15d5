//! Command-line arguments.

use std::path::PathBuf;

use bulwark_log::{Format, Level};
use clap::{Args, Parser, Subcommand};

/// Isolate compromised instances and rotate compromised access keys.
#[derive(Debug, Parser)]
#[command(name = "bulwark", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to `bulwark.toml` when present)
    #[arg(short, long, global = true, env = "BULWARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_name = "pretty|compact|json")]
    pub log_format: Option<Format>,

    /// Log level, replacing any configured filter
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full response pass against AWS and print the response
    Respond(RespondArgs),

    /// Show what a response pass would act on, without calling AWS
    Plan(PlanArgs),
}

#[derive(Debug, Args)]
pub struct RespondArgs {
    /// Incident event JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,

    /// Run identifier used in tags and secret descriptions (defaults to a new UUID)
    #[arg(long)]
    pub incident_id: Option<String>,

    /// AWS region override
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Endpoint override for every AWS client
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Named AWS profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Print the proxy shape, with `body` as a JSON string
    #[arg(long)]
    pub proxy: bool,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Incident event JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,
}
