//! Results command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::input;
use crate::output;

#[derive(Args, Debug)]
pub struct ResultsArgs {
    /// Response file, or `-` for stdin
    pub response: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ResultsArgs, spec: Option<&Path>) -> Result<()> {
    let response = input::load_response(&args.response, spec)?;
    let results = response.results().context("Failed to resolve results")?;

    if results.is_empty() {
        eprintln!("{}", "No results.".dimmed());
        return Ok(());
    }

    for record in &results {
        output::json_with(record, args.pretty)?;
    }

    Ok(())
}
