//! Thin wrapper over the `git` binary for feature branches.

use crate::error::{KitError, Result};
use std::path::Path;
use std::process::Command;

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd
}

pub fn is_available() -> bool {
    which::which("git").is_ok()
}

/// True if `dir` is inside a git work tree.
pub fn is_repo(dir: &Path) -> bool {
    is_available()
        && git(dir)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
}

pub fn current_branch(dir: &Path) -> Result<String> {
    let output = git(dir).args(["rev-parse", "--abbrev-ref", "HEAD"]).output()?;
    if !output.status.success() {
        return Err(KitError::Git(stderr_of(&output)));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn branch_exists(dir: &Path, name: &str) -> bool {
    git(dir)
        .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{name}")])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Check out `name`, creating it from `base` (or HEAD when `base` is empty)
/// if it does not exist. Returns true if the branch was created.
pub fn ensure_branch(dir: &Path, name: &str, base: &str) -> Result<bool> {
    if branch_exists(dir, name) {
        run(dir, &["checkout", name])?;
        return Ok(false);
    }
    if base.is_empty() {
        run(dir, &["checkout", "-b", name])?;
    } else {
        run(dir, &["checkout", "-b", name, base])?;
    }
    tracing::info!(branch = name, "created branch");
    Ok(true)
}

fn run(dir: &Path, args: &[&str]) -> Result<()> {
    let output = git(dir).args(args).output()?;
    if output.status.success() {
        Ok(())
    } else {
        Err(KitError::Git(stderr_of(&output)))
    }
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
