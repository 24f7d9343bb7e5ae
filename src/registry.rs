//! Record of fetched components.
//!
//! A component name is present if and only if it has been cloned
//! successfully at least once in this run. Entries are only dropped by
//! [`ComponentRegistry::clear`], which the clean operation calls.

use std::collections::BTreeMap;

use crate::repository::RepositoryHandle;

/// Registry entry for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// The component's checkout.
    pub repository: RepositoryHandle,
    /// The version last applied by version pinning, if any.
    pub version: Option<String>,
}

/// Known components, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly cloned component. Registering a name again replaces
    /// its checkout and forgets any previously applied version.
    pub fn register(&mut self, name: &str, repository: RepositoryHandle) {
        self.entries.insert(
            name.to_string(),
            RegistryEntry {
                repository,
                version: None,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn repository(&self, name: &str) -> Option<&RepositoryHandle> {
        self.entries.get(name).map(|e| &e.repository)
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.version.as_deref())
    }

    /// Stores the version applied to `name`. Returns false if the component
    /// is unknown.
    pub fn set_version(&mut self, name: &str, version: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.version = Some(version.to_string());
                true
            }
            None => false,
        }
    }

    /// Component names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
