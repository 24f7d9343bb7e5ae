//! # Symlink Materialization
//!
//! Exposes a component checkout to the compiler's search path:
//!
//! - `inventory/classes/components/{name}.yml` links to the component class
//!   `dependencies/{name}/class/{name}.yml`.
//! - `inventory/classes/defaults/{name}.yml` links to
//!   `dependencies/{name}/class/defaults.yml`, if the component has one.
//!   Components without it use the old layout and only get a warning.
//! - Every regular file directly inside `dependencies/{name}/lib/` is linked
//!   into the shared `dependencies/lib/` directory under its own name.
//!
//! All links are relative, so the tree stays valid when copied or mounted
//! elsewhere. Existing entries at a link's location are replaced, which makes
//! [`create_component_symlinks`] safe to call any number of times.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::path::relative_path;

/// Create or refresh all symlinks of `component`.
///
/// The `inventory/classes/components` and `inventory/classes/defaults`
/// directories must already exist; `dependencies/lib` is created on demand.
/// Any filesystem failure aborts this component with [`Error::Symlink`];
/// links belonging to other components are left alone.
pub fn create_component_symlinks(layout: &Layout, component: &str) -> Result<()> {
    link_component(layout, component).map_err(|e| Error::Symlink {
        component: component.to_string(),
        message: e.to_string(),
    })
}

fn link_component(layout: &Layout, component: &str) -> io::Result<()> {
    let class_dir = layout.component_class_dir(component);
    let class_file = format!("{}.yml", component);

    relative_symlink(
        &class_dir,
        &class_file,
        &layout.component_classes_dir(),
        None,
    )?;

    if class_dir.join("defaults.yml").is_file() {
        relative_symlink(
            &class_dir,
            "defaults.yml",
            &layout.defaults_classes_dir(),
            Some(&class_file),
        )?;
    } else {
        warn!(
            "Old-style component detected: '{}' has no class/defaults.yml. \
             Please move component defaults to 'class/defaults.yml'",
            component
        );
    }

    let lib_dir = layout.component_lib_dir(component);
    if lib_dir.is_dir() {
        let shared_lib_dir = layout.lib_dir();
        fs::create_dir_all(&shared_lib_dir)?;
        for file in library_files(&lib_dir)? {
            debug!("Installing template library: {}", file);
            relative_symlink(&lib_dir, &file, &shared_lib_dir, None)?;
        }
    }

    Ok(())
}

/// Names of the regular files directly inside `dir`, sorted.
fn library_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();
    Ok(files)
}

/// Create a link at `dest_dir/dest_name` pointing to `src_dir/src_name`,
/// through the relative path between the two directories.
///
/// `dest_name` defaults to `src_name`. An existing file or link at the
/// destination, dangling or not, is removed first. `dest_dir` must exist.
pub fn relative_symlink(
    src_dir: &Path,
    src_name: &str,
    dest_dir: &Path,
    dest_name: Option<&str>,
) -> io::Result<()> {
    let source = src_dir.join(src_name);
    let link_target = relative_path(&source, dest_dir).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "no relative path from {} to {}",
                dest_dir.display(),
                source.display()
            ),
        )
    })?;
    let link_path = dest_dir.join(dest_name.unwrap_or(src_name));

    remove_existing(&link_path)?;
    symlink_file(&link_target, &link_path)
}

/// Removes whatever non-directory entry sits at `path`.
fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
