//! # Run Configuration
//!
//! [`Config`] carries everything the dependency operations need to know about
//! the environment they run in: the working directory that holds the
//! `inventory/` and `dependencies/` trees, where component repositories live
//! by default, and which file holds the per-component URL overrides.
//!
//! Nothing here is read from process-wide state. The binary builds a
//! `Config` from its CLI flags (which may come from `COMPONENT_DEPS_*`
//! environment variables) and hands it to a [`crate::context::Context`].

use std::path::{Path, PathBuf};

/// Name of the directory under the global git base that holds component
/// repositories.
pub const COMPONENTS_NAMESPACE: &str = "commodore-components";

/// Location of the override configuration file, relative to the working
/// directory.
pub const DEFAULT_CONFIG_FILE: &str = "inventory/classes/global/commodore.yml";

/// Configuration for a component-deps run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working directory containing `inventory/` and `dependencies/`.
    pub work_dir: PathBuf,
    /// Base URL under which component repositories are looked up when no
    /// override exists. Component `foo` resolves to `{base}/foo.git`.
    pub default_component_base: String,
    /// Path of the override configuration file.
    pub config_file: PathBuf,
}

impl Config {
    /// Creates a configuration rooted at `work_dir`.
    ///
    /// Components default to `{global_git_base}/commodore-components` and the
    /// override file to `inventory/classes/global/commodore.yml` inside the
    /// working directory.
    pub fn new(work_dir: impl Into<PathBuf>, global_git_base: &str) -> Self {
        let work_dir = work_dir.into();
        let config_file = work_dir.join(DEFAULT_CONFIG_FILE);
        Self {
            default_component_base: join_url(global_git_base, COMPONENTS_NAMESPACE),
            config_file,
            work_dir,
        }
    }

    /// Overrides the base URL for component repositories.
    pub fn with_component_base(mut self, base: impl Into<String>) -> Self {
        self.default_component_base = base.into();
        self
    }

    /// Overrides the override configuration file. Relative paths are taken
    /// relative to the working directory.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = self.work_dir.join(path);
        self
    }
}

/// Joins a URL base and a path segment with exactly one `/` between them.
pub fn join_url(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment)
}
