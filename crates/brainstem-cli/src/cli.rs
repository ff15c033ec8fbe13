//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{get::GetArgs, results::ResultsArgs, summary::SummaryArgs};

/// Explore sideloaded JSON API responses.
#[derive(Parser, Debug)]
#[command(name = "brainstem")]
#[command(author, version = env!("BRAINSTEM_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Association specification file (JSON). Without one, associations
    /// are not resolved.
    #[arg(long, global = true, env = "BRAINSTEM_SPEC")]
    pub spec: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show count, result pointers and collections
    Summary(SummaryArgs),

    /// Print every result record, in order
    Results(ResultsArgs),

    /// Resolve a dotted path (e.g. `0.participants.1.full_name`)
    Get(GetArgs),
}
