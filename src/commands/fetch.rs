//! Fetch command implementation
//!
//! Runs the dependency pipeline against the working directory:
//! 1. Fetch every component the inventory references, at its default version
//! 2. Optionally pin component versions from a YAML file
//! 3. Optionally fetch template libraries from a YAML file

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use component_deps::context::Context;
use component_deps::document::Document;
use component_deps::fetch::fetch_components;
use component_deps::libs::{fetch_jsonnet_libs, JsonnetLib};
use component_deps::output::OutputConfig;
use component_deps::versions::{set_component_versions, ComponentVersions};

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// YAML file mapping component names to the versions to check out
    #[arg(long, value_name = "PATH", env = "COMPONENT_DEPS_VERSIONS")]
    pub versions: Option<PathBuf>,

    /// YAML file listing template libraries to fetch
    #[arg(long, value_name = "PATH", env = "COMPONENT_DEPS_LIBS")]
    pub libs: Option<PathBuf>,
}

/// Execute the fetch command
pub fn execute(args: FetchArgs, global: &GlobalArgs, output: OutputConfig) -> Result<()> {
    let config = global.config()?;
    let mut ctx = Context::new(config).with_output(output);

    let components = fetch_components(&mut ctx).context("Failed to fetch components")?;
    log::info!("Fetched {} components", components.len());

    if let Some(path) = &args.versions {
        if let Some(document) = read_document(&ctx, path)? {
            let versions = ComponentVersions::from_document(&document)?;
            set_component_versions(&mut ctx, &versions)
                .context("Failed to set component versions")?;
        }
    }

    if let Some(path) = &args.libs {
        if let Some(document) = read_document(&ctx, path)? {
            let libs = JsonnetLib::from_document(&document)?;
            fetch_jsonnet_libs(&mut ctx, &libs).context("Failed to fetch Jsonnet libraries")?;
        }
    }

    Ok(())
}

/// Reads an input file; an empty file yields `None`.
fn read_document(ctx: &Context, path: &Path) -> Result<Option<Document>> {
    ctx.reader()
        .read(path)
        .with_context(|| format!("Could not read {}", path.display()))
}
