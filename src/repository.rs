//! # Repository Access
//!
//! Component and template library repositories are reached through the
//! [`RepositoryClient`] trait. It separates the orchestration logic from the
//! concrete git mechanics so the fetch and version pinning flows can be tested
//! without network access or a git binary.
//!
//! - **`RepositoryClient`**: clone a repository into a directory, and move an
//!   existing checkout to another reference. Checkout reports unresolvable
//!   references as [`Error::GitRef`], distinct from every other failure.
//!
//! - **`RepositoryHandle`**: an opaque handle to a cloned working tree, stored
//!   in the [`crate::registry::ComponentRegistry`].
//!
//! - **`GitRepositoryClient`**: the default implementation, which drives the
//!   system `git` command through [`crate::git`].
//!
//! [`Error::GitRef`]: crate::error::Error::GitRef

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Handle to a cloned working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    working_tree: PathBuf,
}

impl RepositoryHandle {
    pub fn new(working_tree: impl Into<PathBuf>) -> Self {
        Self {
            working_tree: working_tree.into(),
        }
    }

    /// Root directory of the working tree.
    pub fn working_tree(&self) -> &Path {
        &self.working_tree
    }
}

/// Trait for repository operations - allows mocking in tests
pub trait RepositoryClient: Send + Sync {
    /// Fetches a full working copy of `url` into `target_dir`.
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<RepositoryHandle>;

    /// Moves the working tree of `repository` to `reference`.
    ///
    /// Must return [`crate::error::Error::GitRef`] when the reference cannot
    /// be resolved, and any other variant for other failures.
    fn checkout(&self, repository: &RepositoryHandle, reference: &str) -> Result<()>;
}

/// The default implementation of `RepositoryClient`, which uses the system's
/// `git` command.
///
/// A target directory that already holds a checkout is reused as-is, so that
/// re-running a fetch does not clone again. Clean the working state first to
/// force a fresh clone.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRepositoryClient;

impl RepositoryClient for GitRepositoryClient {
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<RepositoryHandle> {
        if crate::git::is_checkout(target_dir) {
            debug!(
                "Reusing existing checkout {} (not cloning {})",
                target_dir.display(),
                url
            );
        } else {
            crate::git::clone(url, target_dir)?;
        }
        Ok(RepositoryHandle::new(target_dir))
    }

    fn checkout(&self, repository: &RepositoryHandle, reference: &str) -> Result<()> {
        crate::git::checkout(repository.working_tree(), reference)
    }
}
