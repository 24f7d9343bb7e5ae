//! # Error Handling
//!
//! This module defines the centralized error type for `component-deps`. It
//! uses `thiserror` to describe every failure mode of component discovery,
//! URL resolution, fetching, version pinning and symlink materialization.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Every variant carries the context a human
//!   needs to diagnose the failure: the offending file path, the repository
//!   URL, the git reference, or the component name.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! ## Severity
//!
//! Most variants are fatal for the operation that produced them. The one
//! exception is [`Error::GitRef`]: version pinning treats an unresolvable
//! reference as recoverable, logs it and moves on to the next component.
//! Callers can use [`Error::is_ref_error`] to tell the two apart.

use std::path::Path;

use thiserror::Error;

/// Main error type for component-deps operations
#[derive(Error, Debug)]
pub enum Error {
    /// The inventory directory to scan for class includes does not exist.
    #[error("Inventory directory not found: {path}")]
    InventoryNotFound { path: String },

    /// A YAML file could not be parsed.
    #[error("YAML parsing error in {path}: {message}")]
    YamlParse { path: String, message: String },

    /// A YAML document parsed fine but does not have the expected shape
    /// (e.g. `classes` is not a list of strings).
    #[error("Unexpected document structure in {path}: {message}")]
    DocumentShape { path: String, message: String },

    /// A structured file exists but could not be read (permissions, invalid
    /// UTF-8).
    #[error("Could not read {path}: {message}")]
    FileRead { path: String, message: String },

    /// The override configuration file could not be read.
    #[error("Could not read configuration file {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// An error occurred while cloning a component or library repository.
    ///
    /// Includes the repository URL, the clone target and an optional hint.
    #[error("Git clone error for {url} into {target}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        target: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git reference could not be resolved in an existing checkout.
    #[error("Unable to resolve git reference '{reference}' in {path}: {message}")]
    GitRef {
        reference: String,
        path: String,
        message: String,
    },

    /// Any other git command failure.
    #[error("Git command failed in {path}: {command} - {stderr}")]
    GitCommand {
        command: String,
        path: String,
        stderr: String,
    },

    /// Creating or refreshing the symlinks of a component or template
    /// library failed.
    #[error("While setting up symlinks for component '{component}': {message}")]
    Symlink { component: String, message: String },

    /// A version was requested for a component that was never fetched.
    #[error("Component '{name}' has not been fetched; cannot set its version")]
    ComponentNotFetched { name: String },

    /// A directory could not be created or removed.
    #[error("Filesystem operation error on {path}: {message}")]
    Filesystem { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error without file context, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns true if this error means a git reference could not be resolved.
    pub fn is_ref_error(&self) -> bool {
        matches!(self, Error::GitRef { .. })
    }

    pub(crate) fn filesystem(path: &Path, err: impl std::fmt::Display) -> Self {
        Error::Filesystem {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
