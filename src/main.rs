//! # Component Dependencies CLI
//!
//! This is the binary entry point for the `component-deps` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and colored output.
//! - Executing the appropriate command and turning library errors into
//!   user-friendly output.
//!
//! The core logic lives in the `component_deps` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
