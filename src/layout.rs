//! On-disk layout of the working directory.
//!
//! ```text
//! inventory/classes/components/{name}.yml -> dependencies/{name}/class/{name}.yml
//! inventory/classes/defaults/{name}.yml   -> dependencies/{name}/class/defaults.yml
//! dependencies/lib/{file}                 -> dependencies/{name}/lib/{file}
//! dependencies/{name}/                       component checkout
//! dependencies/libs/{lib}/                   template library checkout
//! ```

use std::path::{Path, PathBuf};

/// Path conventions derived from a single working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `inventory/`
    pub fn inventory_dir(&self) -> PathBuf {
        self.root.join("inventory")
    }

    /// `inventory/classes/components/`, where component classes are linked.
    pub fn component_classes_dir(&self) -> PathBuf {
        self.inventory_dir().join("classes").join("components")
    }

    /// `inventory/classes/defaults/`, where component defaults are linked.
    pub fn defaults_classes_dir(&self) -> PathBuf {
        self.inventory_dir().join("classes").join("defaults")
    }

    /// `dependencies/`
    pub fn dependencies_dir(&self) -> PathBuf {
        self.root.join("dependencies")
    }

    /// `dependencies/lib/`, the shared template library search path.
    pub fn lib_dir(&self) -> PathBuf {
        self.dependencies_dir().join("lib")
    }

    /// `dependencies/libs/`, where template library repositories are cloned.
    pub fn libs_dir(&self) -> PathBuf {
        self.dependencies_dir().join("libs")
    }

    /// `compiled/`, the output of the downstream compiler.
    pub fn compiled_dir(&self) -> PathBuf {
        self.root.join("compiled")
    }

    /// `dependencies/{name}/`
    pub fn component_dir(&self, name: &str) -> PathBuf {
        self.dependencies_dir().join(name)
    }

    /// `dependencies/{name}/class/`
    pub fn component_class_dir(&self, name: &str) -> PathBuf {
        self.component_dir(name).join("class")
    }

    /// `dependencies/{name}/lib/`
    pub fn component_lib_dir(&self, name: &str) -> PathBuf {
        self.component_dir(name).join("lib")
    }

    /// The directories every fetch needs before any component is linked.
    pub fn shared_dirs(&self) -> [PathBuf; 3] {
        [
            self.component_classes_dir(),
            self.defaults_classes_dir(),
            self.lib_dir(),
        ]
    }
}
