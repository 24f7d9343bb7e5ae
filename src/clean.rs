//! Reset of the working state.

use std::fs;
use std::io;

use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};

/// Remove `inventory/`, `dependencies/` and `compiled/` and forget every
/// fetched component. Directories that do not exist are skipped.
pub fn clean(ctx: &mut Context) -> Result<()> {
    ctx.output.heading("Cleaning working tree...");
    for dir in [
        ctx.layout.inventory_dir(),
        ctx.layout.dependencies_dir(),
        ctx.layout.compiled_dir(),
    ] {
        match fs::remove_dir_all(&dir) {
            Ok(()) => debug!("Removed {}", dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::filesystem(&dir, e)),
        }
    }
    ctx.registry.clear();
    Ok(())
}
