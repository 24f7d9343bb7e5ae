//! # Component URL Resolution
//!
//! Maps discovered component names to the repositories they are cloned from.
//!
//! The override configuration file may list explicit URLs:
//!
//! ```yaml
//! components:
//!   - name: argocd
//!     url: ssh://git@git.example.com/forks/component-argocd.git
//! ```
//!
//! Every component without an override is looked up at
//! `{default_component_base}/{name}.git`. The checkout always goes to
//! `dependencies/{name}`, override or not.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::join_url;
use crate::document::StructuredFileReader;
use crate::error::{Error, Result};

/// A component to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub repository_url: String,
    pub target_directory: PathBuf,
}

/// Resolve each of `component_names` to a [`Component`], preserving order.
///
/// `config_file` must be readable; an empty file only produces a warning.
/// `dependencies_dir` is the directory the component checkouts live in.
pub fn read_component_urls(
    component_names: &[String],
    config_file: &Path,
    default_component_base: &str,
    dependencies_dir: &Path,
    reader: &dyn StructuredFileReader,
) -> Result<Vec<Component>> {
    let overrides = read_overrides(config_file, reader)?;

    let components = component_names
        .iter()
        .map(|name| {
            let repository_url = overrides
                .get(name)
                .cloned()
                .unwrap_or_else(|| default_url(default_component_base, name));
            Component {
                name: name.clone(),
                repository_url,
                target_directory: dependencies_dir.join(name),
            }
        })
        .collect();

    Ok(components)
}

/// `{base}/{name}.git`
pub fn default_url(default_component_base: &str, name: &str) -> String {
    join_url(default_component_base, &format!("{}.git", name))
}

/// Reads the name -> URL overrides. Later entries win over earlier ones.
fn read_overrides(
    config_file: &Path,
    reader: &dyn StructuredFileReader,
) -> Result<HashMap<String, String>> {
    debug!("Reading configuration file {}", config_file.display());
    let document = reader.read(config_file).map_err(|e| Error::ConfigRead {
        path: config_file.display().to_string(),
        message: e.to_string(),
    })?;

    let mut overrides = HashMap::new();
    let Some(document) = document else {
        warn!("Empty configuration file {}", config_file.display());
        return Ok(overrides);
    };

    for entry in document.sequence_of_mappings("components")? {
        let name = entry.mapping_field("name")?;
        let url = entry.mapping_field("url")?;
        debug!("Found override for component {}: using URL {}", name, url);
        overrides.insert(name, url);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::YamlFileReader;
    use std::fs;
    use tempfile::TempDir;

    const BASE: &str = "ssh://git@git.example.com/commodore-components";

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn config_file(temp: &TempDir, content: &str) -> PathBuf {
        let dir = temp.path().join("inventory/classes/global");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("commodore.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_override_precedence() {
        let temp = TempDir::new().unwrap();
        let path = config_file(
            &temp,
            "components:\n  - name: foo\n    url: ssh://custom/foo.git\n",
        );

        let components = read_component_urls(
            &names(&["foo", "bar"]),
            &path,
            BASE,
            Path::new("dependencies"),
            &YamlFileReader,
        )
        .unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name, "foo");
        assert_eq!(components[0].repository_url, "ssh://custom/foo.git");
        assert_eq!(components[0].target_directory, PathBuf::from("dependencies/foo"));
        assert_eq!(components[1].name, "bar");
        assert_eq!(components[1].repository_url, format!("{}/bar.git", BASE));
        assert_eq!(components[1].target_directory, PathBuf::from("dependencies/bar"));
    }

    #[test]
    fn test_duplicate_override_last_wins() {
        let temp = TempDir::new().unwrap();
        let path = config_file(
            &temp,
            "components:\n  - name: foo\n    url: first\n  - name: foo\n    url: second\n",
        );
        let components =
            read_component_urls(&names(&["foo"]), &path, BASE, Path::new("d"), &YamlFileReader)
                .unwrap();
        assert_eq!(components[0].repository_url, "second");
    }

    #[test]
    fn test_empty_override_file() {
        testing_logger::setup();
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "");

        let components = read_component_urls(
            &names(&["foo", "bar"]),
            &path,
            BASE,
            Path::new("dependencies"),
            &YamlFileReader,
        )
        .unwrap();

        assert_eq!(components[0].repository_url, format!("{}/foo.git", BASE));
        assert_eq!(components[1].repository_url, format!("{}/bar.git", BASE));
        testing_logger::validate(|logs| {
            assert!(logs
                .iter()
                .any(|l| l.level == log::Level::Warn && l.body.contains("Empty configuration file")));
        });
    }

    #[test]
    fn test_missing_override_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory/classes/global/commodore.yml");

        let err = read_component_urls(&[], &path, BASE, Path::new("d"), &YamlFileReader)
            .unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert!(err
            .to_string()
            .contains("inventory/classes/global/commodore.yml"));
    }

    #[test]
    fn test_malformed_override_file() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "components: [\n");
        let err = read_component_urls(&names(&["foo"]), &path, BASE, Path::new("d"), &YamlFileReader)
            .unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_override_entry_without_url() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "components:\n  - name: foo\n");
        let err = read_component_urls(&names(&["foo"]), &path, BASE, Path::new("d"), &YamlFileReader)
            .unwrap_err();
        assert!(matches!(err, Error::DocumentShape { .. }));
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_config_without_components_key() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "parameters:\n  foo: bar\n");
        let components =
            read_component_urls(&names(&["foo"]), &path, BASE, Path::new("d"), &YamlFileReader)
                .unwrap();
        assert_eq!(components[0].repository_url, format!("{}/foo.git", BASE));
    }

    #[test]
    fn test_default_url_trailing_slash() {
        assert_eq!(
            default_url("https://git.example.com/components/", "foo"),
            "https://git.example.com/components/foo.git"
        );
    }
}
