//! Clean command implementation

use anyhow::{Context as _, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use component_deps::clean::clean;
use component_deps::context::Context;
use component_deps::output::OutputConfig;

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {}

/// Execute the clean command
pub fn execute(_args: CleanArgs, global: &GlobalArgs, output: OutputConfig) -> Result<()> {
    let mut ctx = Context::new(global.local_config()).with_output(output);
    clean(&mut ctx).context("Failed to clean working directory")
}
