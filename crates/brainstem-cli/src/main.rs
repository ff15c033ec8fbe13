//! brainstem - CLI tool for exploring sideloaded JSON API responses.
//!
//! This is a thin wrapper over the `brainstem-adaptor` library, intended for
//! inspecting response bodies and following their associations by hand.

mod cli;
mod commands;
mod input;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{get, results, summary};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let spec = cli.spec.as_deref();
    match cli.command {
        Commands::Summary(args) => summary::run(args, spec),
        Commands::Results(args) => results::run(args, spec),
        Commands::Get(args) => get::run(args, spec),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
