//! Thin wrappers around the system `git` command.
//!
//! Using the system git automatically picks up:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use log::{debug, trace};

use crate::error::{Error, Result};

/// Returns true if `dir` already holds a git working tree.
pub fn is_checkout(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Clone `url` into `target_dir` with full history.
///
/// Full clones are needed because components are later pinned to arbitrary
/// tags, branches or commits.
pub fn clone(url: &str, target_dir: &Path) -> Result<()> {
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
    }

    debug!("git clone {} {}", url, target_dir.display());
    let output = Command::new("git")
        .args(["clone", "--quiet", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            target: target_dir.display().to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // Common auth failures get a pointer at the usual suspects
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository: \
                 SSH key added to ssh-agent, git credentials configured, \
                 or a personal access token set up"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            target: target_dir.display().to_string(),
            message: stderr,
            hint,
        });
    }

    Ok(())
}

/// Resolve `reference` to a commit id in the repository at `repo_dir`.
///
/// Tries the reference as given, then as a remote-tracking branch of
/// `origin`, so that branches which only exist upstream can be pinned right
/// after a clone. Returns [`Error::GitRef`] if neither resolves.
pub fn resolve_commit(repo_dir: &Path, reference: &str) -> Result<String> {
    let candidates = [
        format!("{}^{{commit}}", reference),
        format!("origin/{}^{{commit}}", reference),
    ];
    for candidate in &candidates {
        let output = run(repo_dir, &["rev-parse", "--verify", "--quiet", candidate])?;
        if output.status.success() {
            let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
            trace!("resolved {} to {} in {}", candidate, sha, repo_dir.display());
            return Ok(sha);
        }
        // --quiet keeps stderr empty for unknown refs; anything else is a
        // broken repository rather than a missing reference
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(Error::GitCommand {
                command: format!("rev-parse {}", candidate),
                path: repo_dir.display().to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
    }
    Err(Error::GitRef {
        reference: reference.to_string(),
        path: repo_dir.display().to_string(),
        message: "reference not found".to_string(),
    })
}

/// Check out `reference` in the repository at `repo_dir` as a detached HEAD.
pub fn checkout(repo_dir: &Path, reference: &str) -> Result<()> {
    if !is_checkout(repo_dir) {
        return Err(Error::GitCommand {
            command: "checkout".to_string(),
            path: repo_dir.display().to_string(),
            stderr: "not a git working tree".to_string(),
        });
    }

    let sha = resolve_commit(repo_dir, reference)?;
    let output = run(repo_dir, &["checkout", "--quiet", "--detach", &sha])?;
    if !output.status.success() {
        return Err(Error::GitCommand {
            command: format!("checkout {}", reference),
            path: repo_dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Run `git -C <repo_dir> <args>` and capture its output.
fn run(repo_dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            path: repo_dir.display().to_string(),
            stderr: e.to_string(),
        })
}
