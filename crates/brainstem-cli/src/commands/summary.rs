//! Summary command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::input;
use crate::output;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Response file, or `-` for stdin
    pub response: PathBuf,
}

pub fn run(args: SummaryArgs, spec: Option<&Path>) -> Result<()> {
    let response = input::load_response(&args.response, spec)?;

    output::field("Count", &response.count().to_string());
    output::field(
        "Specification",
        if response.specification().is_some() {
            "loaded"
        } else {
            "none"
        },
    );

    println!();
    output::heading("Results");
    if response.pointers().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (index, pointer) in response.pointers().iter().enumerate() {
        println!("  {}  {}/{}", index, pointer.collection, pointer.id);
    }

    println!();
    output::heading("Collections");
    for name in response.collection_names() {
        let rows = response.collection(name).map_or(0, |rows| rows.len());
        println!("  {}  {} {}", name, rows, "records".dimmed());
    }

    Ok(())
}
