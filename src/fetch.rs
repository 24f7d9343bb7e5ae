//! # Component Fetching
//!
//! Establishes the full set of components at their default versions:
//!
//! 1.  **Discovery**: collect the components referenced by the inventory.
//! 2.  **URL resolution**: apply the override configuration file.
//! 3.  **Shared directories**: create `inventory/classes/components`,
//!     `inventory/classes/defaults` and `dependencies/lib`.
//! 4.  **Per component**, in discovery order: clone the repository, record it
//!     in the registry, and materialize its symlinks.
//!
//! There is no best-effort mode. The first clone or symlink failure aborts
//! the run; components handled before the failure stay registered.

use std::fs;

use log::debug;

use crate::context::Context;
use crate::discovery::discover_components;
use crate::error::{Error, Result};
use crate::resolver::{read_component_urls, Component};
use crate::symlinks::create_component_symlinks;

/// Discover, resolve, clone and link every component the inventory needs.
pub fn fetch_components(ctx: &mut Context) -> Result<Vec<Component>> {
    ctx.output.heading("Discovering components...");
    let component_names = discover_components(&ctx.layout.inventory_dir(), ctx.reader())?;
    let components = read_component_urls(
        &component_names,
        &ctx.config.config_file,
        &ctx.config.default_component_base,
        &ctx.layout.dependencies_dir(),
        ctx.reader(),
    )?;

    ctx.output.heading("Fetching components...");
    for dir in ctx.layout.shared_dirs() {
        fs::create_dir_all(&dir).map_err(|e| Error::filesystem(&dir, e))?;
    }

    for component in &components {
        debug!(
            "Fetching component {} from {}",
            component.name, component.repository_url
        );
        let repository = ctx
            .repo_client()
            .clone_repository(&component.repository_url, &component.target_directory)?;
        ctx.registry.register(&component.name, repository);
        create_component_symlinks(&ctx.layout, &component.name)?;
    }

    Ok(components)
}
