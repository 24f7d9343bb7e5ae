//! # Template Libraries
//!
//! Fetches shared Jsonnet libraries that are not part of any component and
//! exposes selected files in the shared `dependencies/lib` directory, next to
//! the component libraries.
//!
//! A library list looks like:
//!
//! ```yaml
//! - name: kube-libsonnet
//!   repository: https://github.com/bitnami-labs/kube-libsonnet
//!   files:
//!     - libfile: kube.libsonnet
//!       targetfile: kube.libjsonnet
//! ```

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::context::Context;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::symlinks::relative_symlink;

/// A library repository and the files to expose from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonnetLib {
    pub name: String,
    pub repository: String,
    #[serde(default)]
    pub files: Vec<LibFile>,
}

/// One file of a library checkout and the name it is exposed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibFile {
    /// Path relative to the library checkout
    pub libfile: String,
    /// Path relative to `dependencies/lib`
    pub targetfile: String,
}

impl JsonnetLib {
    /// Parses a YAML sequence of libraries.
    pub fn from_document(document: &Document) -> Result<Vec<Self>> {
        serde_yaml::from_value(document.value().clone()).map_err(|e| Error::DocumentShape {
            path: document.path().display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Clone every library into `dependencies/libs/{name}` and link its files.
///
/// Clone and link failures abort the operation.
pub fn fetch_jsonnet_libs(ctx: &mut Context, libs: &[JsonnetLib]) -> Result<()> {
    ctx.output.heading("Updating Jsonnet libraries...");

    let libs_dir = ctx.layout.libs_dir();
    let lib_dir = ctx.layout.lib_dir();
    for dir in [&libs_dir, &lib_dir] {
        fs::create_dir_all(dir).map_err(|e| Error::filesystem(dir, e))?;
    }

    for lib in libs {
        info!("{}: {}", lib.name, lib.repository);
        let repository = ctx
            .repo_client()
            .clone_repository(&lib.repository, &libs_dir.join(&lib.name))?;
        for file in &lib.files {
            link_lib_file(lib, repository.working_tree(), file, &lib_dir)?;
        }
    }
    Ok(())
}

fn link_lib_file(
    lib: &JsonnetLib,
    checkout: &Path,
    file: &LibFile,
    lib_dir: &Path,
) -> Result<()> {
    debug!("Installing template library: {}", file.targetfile);
    link_into(checkout, file, lib_dir).map_err(|e| Error::Symlink {
        component: lib.name.clone(),
        message: format!("{}: {}", file.targetfile, e),
    })
}

fn link_into(checkout: &Path, file: &LibFile, lib_dir: &Path) -> io::Result<()> {
    let target = lib_dir.join(&file.targetfile);
    let (Some(dest_dir), Some(dest_name)) = (target.parent(), target.file_name()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid target file name",
        ));
    };
    fs::create_dir_all(dest_dir)?;
    relative_symlink(
        checkout,
        &file.libfile,
        dest_dir,
        Some(&dest_name.to_string_lossy()),
    )
}
