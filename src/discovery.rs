//! # Component Discovery
//!
//! Scans the inventory for class includes that reference components.
//!
//! Every `*.yml` / `*.yaml` file below the inventory root is parsed and its
//! `classes` list inspected. An include of the form `components.<name>`
//! (optionally followed by further dotted segments) marks `<name>` as a
//! required component.
//!
//! The result is deduplicated and sorted, so fetch order and diagnostic
//! output are the same on every run for the same inventory content, no
//! matter in which order the filesystem returns directory entries.

use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, trace};
use walkdir::WalkDir;

use crate::document::StructuredFileReader;
use crate::error::{Error, Result};

/// Prefix of class includes that reference a component.
pub const COMPONENT_CLASS_PREFIX: &str = "components.";

const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Discover the components required by the inventory at `inventory_root`.
///
/// Files that parse to an empty document are skipped. Malformed YAML and a
/// `classes` value that is not a list of strings are errors naming the file.
pub fn discover_components(
    inventory_root: &Path,
    reader: &dyn StructuredFileReader,
) -> Result<Vec<String>> {
    if !inventory_root.is_dir() {
        return Err(Error::InventoryNotFound {
            path: inventory_root.display().to_string(),
        });
    }

    let mut components = BTreeSet::new();

    for entry in WalkDir::new(inventory_root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::filesystem(inventory_root, e))?;
        let path = entry.path();
        if !is_yaml_file(path) {
            continue;
        }

        trace!("Discovering components in {}", path.display());
        let Some(document) = reader.read(path)? else {
            continue;
        };
        for class in document.sequence_of_strings("classes")? {
            if let Some(component) = component_name(&class) {
                if components.insert(component.to_string()) {
                    debug!("Found component {}", component);
                }
            }
        }
    }

    Ok(components.into_iter().collect())
}

/// Extracts the component name from a class include, if it references one.
///
/// `components.argocd` and `components.argocd.extra` both yield `argocd`.
pub fn component_name(class: &str) -> Option<&str> {
    let rest = class.strip_prefix(COMPONENT_CLASS_PREFIX)?;
    let name = rest.split('.').next().unwrap_or_default();
    if name.is_empty() { None } else { Some(name) }
}

/// Regular files (or symlinks resolving to one) with a YAML extension.
/// Dangling symlinks are skipped.
fn is_yaml_file(path: &Path) -> bool {
    let has_yaml_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| YAML_EXTENSIONS.contains(&e));
    has_yaml_extension && path.is_file()
}
