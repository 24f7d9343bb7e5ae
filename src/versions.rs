//! # Component Version Pinning
//!
//! Moves already-fetched components to explicit versions (any git tree-ish).
//!
//! For every requested component the checkout is moved to the requested
//! reference, the component's symlinks are rebuilt (its `class/`,
//! `defaults.yml` and `lib/` may differ between versions) and the version is
//! recorded in the registry.
//!
//! A reference that cannot be resolved is not fatal: it is logged, the
//! symlinks are rebuilt from whatever the working tree now holds, the
//! requested version is still recorded, and the remaining components are
//! processed. Any other checkout failure aborts the whole operation.

use std::collections::BTreeMap;

use log::{info, warn};

use crate::context::Context;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::symlinks::create_component_symlinks;

/// Requested versions, keyed by component name.
///
/// Ordered so that components are always processed in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentVersions(BTreeMap<String, String>);

impl ComponentVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: impl Into<String>, version: impl Into<String>) {
        self.0.insert(component.into(), version.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads versions from a mapping of component name to either a
    /// `{version: <ref>}` mapping or a bare reference string:
    ///
    /// ```yaml
    /// argocd:
    ///   version: v1.2.0
    /// metrics-server: master
    /// ```
    ///
    /// Numeric references are accepted as written by YAML; quote commit ids
    /// with leading zeros to keep them intact.
    pub fn from_document(document: &Document) -> Result<Self> {
        let shape_error = |message: String| Error::DocumentShape {
            path: document.path().display().to_string(),
            message,
        };

        let Some(mapping) = document.value().as_mapping() else {
            return Err(shape_error("versions must be a mapping".to_string()));
        };

        let mut versions = Self::new();
        for (key, value) in mapping {
            let Some(name) = key.as_str() else {
                return Err(shape_error("component names must be strings".to_string()));
            };
            let reference = match value {
                serde_yaml::Value::Mapping(fields) => fields.get("version"),
                other => Some(other),
            };
            let Some(version) = reference.and_then(reference_string) else {
                return Err(shape_error(format!(
                    "version of component '{}' must be a string or a mapping with a 'version' key",
                    name
                )));
            };
            versions.insert(name, version);
        }
        Ok(versions)
    }
}

/// A git reference given as a YAML scalar. Unquoted commit ids such as
/// `1234567` parse as numbers and are taken verbatim.
fn reference_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(reference) => Some(reference.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

impl FromIterator<(String, String)> for ComponentVersions {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check out the requested version of each component.
///
/// Every component must have been fetched before; asking for an unknown one
/// is a configuration error and fails with [`Error::ComponentNotFetched`].
pub fn set_component_versions(ctx: &mut Context, versions: &ComponentVersions) -> Result<()> {
    ctx.output.heading("Setting component versions...");
    for (component, version) in versions.iter() {
        set_component_version(ctx, component, version)?;
    }
    Ok(())
}

fn set_component_version(ctx: &mut Context, component: &str, version: &str) -> Result<()> {
    info!("{}: {}", component, version);
    let repository = ctx
        .registry
        .repository(component)
        .ok_or_else(|| Error::ComponentNotFetched {
            name: component.to_string(),
        })?;

    match ctx.repo_client().checkout(repository, version) {
        Ok(()) => {}
        Err(e) if e.is_ref_error() => {
            warn!("Unable to set version of component '{}': {}", component, e);
        }
        Err(e) => return Err(e),
    }

    // Links again, for the checked out version
    create_component_symlinks(&ctx.layout, component)?;
    ctx.registry.set_version(component, version);
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::YamlFileReader;
    use crate::output::OutputConfig;
    use crate::repository::mock::MockRepositoryClient;
    use crate::repository::RepositoryHandle;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// A context in which `names` have been fetched with a legacy layout.
    fn fetched(root: &Path, client: MockRepositoryClient, names: &[&str]) -> Context {
        let mut ctx = Context::with_operations(
            Config::new(root, "mock://"),
            Box::new(client),
            Box::new(YamlFileReader),
        )
        .with_output(OutputConfig::quiet());
        for dir in ctx.layout.shared_dirs() {
            fs::create_dir_all(dir).unwrap();
        }
        for name in names {
            let class_dir = ctx.layout.component_class_dir(name);
            fs::create_dir_all(&class_dir).unwrap();
            fs::write(class_dir.join(format!("{}.yml", name)), "").unwrap();
            let handle = RepositoryHandle::new(ctx.layout.component_dir(name));
            ctx.registry.register(name, handle);
        }
        ctx
    }

    fn versions(pairs: &[(&str, &str)]) -> ComponentVersions {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_partial_failure_isolation() {
        testing_logger::setup();
        let temp = TempDir::new().unwrap();
        let client = MockRepositoryClient::new().with_version(
            "v1.0.0",
            &[
                ("class/foo.yml", "parameters: {}"),
                ("class/defaults.yml", "parameters: {}"),
                ("lib/foo.libsonnet", "{}"),
            ],
        );
        let checkout_calls = client.checkout_calls.clone();
        let mut ctx = fetched(temp.path(), client, &["foo", "bar"]);

        set_component_versions(
            &mut ctx,
            &versions(&[("foo", "v1.0.0"), ("bar", "does-not-exist")]),
        )
        .unwrap();

        // Both components were attempted
        assert_eq!(checkout_calls.lock().unwrap().len(), 2);
        assert_eq!(ctx.registry.version("foo"), Some("v1.0.0"));
        assert_eq!(ctx.registry.version("bar"), Some("does-not-exist"));

        // foo's new defaults and library got linked
        assert!(ctx.layout.defaults_classes_dir().join("foo.yml").is_file());
        assert!(ctx.layout.lib_dir().join("foo.libsonnet").is_file());
        // bar's links were rebuilt from its unchanged tree
        assert!(ctx.layout.component_classes_dir().join("bar.yml").is_file());

        testing_logger::validate(|logs| {
            assert!(logs.iter().any(|l| l.level == log::Level::Warn
                && l.body.contains("'bar'")
                && l.body.contains("does-not-exist")));
        });
    }

    #[test]
    fn test_other_checkout_failure_aborts() {
        let temp = TempDir::new().unwrap();
        let client = MockRepositoryClient::new()
            .with_version("v1.0.0", &[("class/foo.yml", "")])
            .with_broken_ref("corrupt");
        let checkout_calls = client.checkout_calls.clone();
        let mut ctx = fetched(temp.path(), client, &["bar", "foo"]);

        let err = set_component_versions(
            &mut ctx,
            &versions(&[("bar", "corrupt"), ("foo", "v1.0.0")]),
        )
        .unwrap_err();

        assert!(matches!(err, Error::GitCommand { .. }));
        assert_eq!(checkout_calls.lock().unwrap().len(), 1);
        assert_eq!(ctx.registry.version("bar"), None);
        assert_eq!(ctx.registry.version("foo"), None);
    }

    #[test]
    fn test_unfetched_component_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ctx = fetched(temp.path(), MockRepositoryClient::new(), &["foo"]);

        let err = set_component_versions(&mut ctx, &versions(&[("argocd", "v1.0.0")]))
            .unwrap_err();
        assert!(matches!(err, Error::ComponentNotFetched { .. }));
        assert!(err.to_string().contains("argocd"));
    }

    #[test]
    fn test_versions_from_document() {
        let document = Document::parse(
            Path::new("versions.yml"),
            "foo:\n  version: v1.0.0\nbar: master\n",
        )
        .unwrap()
        .unwrap();
        let versions = ComponentVersions::from_document(&document).unwrap();
        assert_eq!(
            versions.iter().collect::<Vec<_>>(),
            vec![("bar", "master"), ("foo", "v1.0.0")]
        );
    }

    #[test]
    fn test_versions_from_document_numeric_refs() {
        let document = Document::parse(
            Path::new("versions.yml"),
            "foo:\n  version: 1234567\nbar: 2024\n",
        )
        .unwrap()
        .unwrap();
        let versions = ComponentVersions::from_document(&document).unwrap();
        assert_eq!(
            versions.iter().collect::<Vec<_>>(),
            vec![("bar", "2024"), ("foo", "1234567")]
        );
    }

    #[test]
    fn test_versions_from_document_shape_errors() {
        for content in [
            "- foo\n",
            "foo:\n  ref: v1\n",
            "foo: [v1]\n",
            "foo:\n  version: true\n",
        ] {
            let document = Document::parse(Path::new("versions.yml"), content)
                .unwrap()
                .unwrap();
            let err = ComponentVersions::from_document(&document).unwrap_err();
            assert!(matches!(err, Error::DocumentShape { .. }), "{}", content);
        }
    }
}
