//! # Component Dependency Library
//!
//! This library resolves, fetches and materializes the external components
//! an inventory-based configuration compiler depends on. It is designed to be
//! used by the `component-deps` command-line tool but can also be driven
//! directly.
//!
//! ## Quick Example
//!
//! ```no_run
//! use component_deps::config::Config;
//! use component_deps::context::Context;
//! use component_deps::fetch::fetch_components;
//! use component_deps::versions::{set_component_versions, ComponentVersions};
//!
//! let config = Config::new("/work/cluster", "ssh://git@git.example.com");
//! let mut ctx = Context::new(config);
//!
//! fetch_components(&mut ctx).unwrap();
//!
//! let mut versions = ComponentVersions::new();
//! versions.insert("argocd", "v1.2.0");
//! set_component_versions(&mut ctx, &versions).unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **Discovery (`discovery`)**: Scans the inventory class files for
//!   `components.<name>` references.
//! - **Resolution (`resolver`)**: Maps each component to a repository URL,
//!   honouring overrides from the configuration file.
//! - **Repositories (`repository`, `git`)**: Clone and checkout behind the
//!   `RepositoryClient` trait.
//! - **Symlinks (`symlinks`)**: Link each component's class, defaults and
//!   libraries into the shared inventory and library directories.
//! - **Registry (`registry`)**: The set of fetched components, their checkouts
//!   and pinned versions, kept in an explicit [`context::Context`].
//!
//! ## Execution Flow
//!
//! 1.  **Fetch** ([`fetch::fetch_components`]): discover, resolve, clone and
//!     link every component at its default version.
//! 2.  **Pin** ([`versions::set_component_versions`]): move selected
//!     components to explicit versions and relink them.
//! 3.  **Libraries** ([`libs::fetch_jsonnet_libs`]): fetch shared template
//!     libraries that do not belong to a component.
//!
//! [`clean::clean`] resets the working state.

pub mod clean;
pub mod config;
pub mod context;
pub mod discovery;
pub mod document;
pub mod error;
pub mod fetch;
pub mod git;
pub mod layout;
pub mod libs;
pub mod output;
pub mod path;
pub mod registry;
pub mod repository;
pub mod resolver;
pub mod symlinks;
pub mod versions;
