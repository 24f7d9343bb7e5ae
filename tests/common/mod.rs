//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a working directory fixture and helpers that build
//! local git repositories to fetch components from.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_classes("global/common.yml", &["components.foo"])
//!         .with_component_repo("foo", &[]);
//!     fixture.command().arg("fetch").assert().success();
//! }
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{component_files, git, TestFixture};
}

/// Runs `git` in `dir` and returns its trimmed stdout. Panics on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Files of a component with a class, defaults and the given libraries.
pub fn component_files(name: &str, libs: &[&str]) -> Vec<(String, String)> {
    let mut files = vec![
        (
            format!("class/{}.yml", name),
            format!("parameters:\n  {}: {{}}\n", name.replace('-', "_")),
        ),
        (
            "class/defaults.yml".to_string(),
            "parameters: {}\n".to_string(),
        ),
    ];
    for lib in libs {
        files.push((format!("lib/{}", lib), "{}\n".to_string()));
    }
    files
}

/// A working directory plus a directory of component repositories.
///
/// Repositories are plain local git repositories under `remotes/`, named
/// `{name}.git`, so `remotes_url()` works as the component base.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty working directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work dir");
        Self { temp_dir }
    }

    /// Add a file under the working directory.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("work")
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an inventory class file under `inventory/classes/` that includes
    /// `classes`.
    pub fn with_classes(self, path: &str, classes: &[&str]) -> Self {
        let mut content = String::from("classes:\n");
        for class in classes {
            content.push_str(&format!("  - {}\n", class));
        }
        self.with_file(&format!("inventory/classes/{}", path), &content)
    }

    /// Add an empty override configuration file.
    pub fn with_empty_config(self) -> Self {
        self.with_file("inventory/classes/global/commodore.yml", "")
    }

    /// Create a component repository with one commit holding the default
    /// component files and `libs`.
    pub fn with_component_repo(self, name: &str, libs: &[&str]) -> Self {
        let files = component_files(name, libs);
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        self.with_repo(&format!("{}.git", name), &refs);
        self
    }

    /// Create a repository under `remotes/` with one commit holding `files`.
    /// Returns its path.
    pub fn with_repo(&self, dir_name: &str, files: &[(&str, &str)]) -> PathBuf {
        let repo = self.remotes().join(dir_name);
        std::fs::create_dir_all(&repo).expect("Failed to create repo dir");
        git(&repo, &["init", "--quiet"]);
        self.commit(&repo, files, "Initial commit");
        repo
    }

    /// Write `files` into `repo` and commit them.
    pub fn commit(&self, repo: &Path, files: &[(&str, &str)], message: &str) {
        for (path, content) in files {
            let full = repo.join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
        git(repo, &["add", "--all"]);
        git(repo, &["commit", "--quiet", "--allow-empty", "-m", message]);
    }

    /// Path of the working directory.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Directory holding the component repositories.
    pub fn remotes(&self) -> PathBuf {
        self.temp_dir.path().join("remotes")
    }

    /// Component base URL pointing at `remotes()`.
    pub fn remotes_url(&self) -> String {
        self.remotes().display().to_string()
    }

    /// Create a command configured to run against this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("component-deps");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("COMPONENT_DEPS_GLOBAL_GIT_BASE")
            .arg("--work-dir")
            .arg(self.path())
            .arg("--component-base")
            .arg(self.remotes_url());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
