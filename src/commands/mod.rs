//! # CLI Command Implementations
//!
//! Each subcommand of the `component-deps` command-line tool lives in its own
//! file and contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the global
//!   settings and calls into the `component_deps` library.

pub mod clean;
pub mod fetch;
