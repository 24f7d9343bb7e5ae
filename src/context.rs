//! Explicit state shared by the dependency operations.
//!
//! A [`Context`] bundles the run configuration, the derived directory layout,
//! the component registry and the two external capabilities (repository
//! access and structured file reading). Every operation takes the context it
//! works on; there is no process-wide state.

use crate::config::Config;
use crate::document::{StructuredFileReader, YamlFileReader};
use crate::layout::Layout;
use crate::output::OutputConfig;
use crate::registry::ComponentRegistry;
use crate::repository::{GitRepositoryClient, RepositoryClient};

/// State and collaborators for one run
pub struct Context {
    pub config: Config,
    pub layout: Layout,
    pub registry: ComponentRegistry,
    pub output: OutputConfig,
    repo_client: Box<dyn RepositoryClient>,
    reader: Box<dyn StructuredFileReader>,
}

impl Context {
    /// Creates a context that uses the system `git` and `serde_yaml`.
    pub fn new(config: Config) -> Self {
        Self::with_operations(
            config,
            Box::new(GitRepositoryClient),
            Box::new(YamlFileReader),
        )
    }

    /// Creates a context with custom `RepositoryClient` and
    /// `StructuredFileReader` implementations.
    pub fn with_operations(
        config: Config,
        repo_client: Box<dyn RepositoryClient>,
        reader: Box<dyn StructuredFileReader>,
    ) -> Self {
        let layout = Layout::new(config.work_dir.clone());
        Self {
            config,
            layout,
            registry: ComponentRegistry::new(),
            output: OutputConfig::default(),
            repo_client,
            reader,
        }
    }

    /// Replaces the terminal output settings.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn repo_client(&self) -> &dyn RepositoryClient {
        self.repo_client.as_ref()
    }

    pub fn reader(&self) -> &dyn StructuredFileReader {
        self.reader.as_ref()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
