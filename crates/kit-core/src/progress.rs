//! Checkbox progress for TASKS.md.
//!
//! Scanning is line-oriented: only list items written with a literal `- [`
//! prefix count as tasks.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Sentinel appended to TASKS.md once a feature's reflection is done.
pub const COMPLETION_MARKER: &str = "<!-- REFLECTION_COMPLETE -->";

static INCOMPLETE_RE: OnceLock<Regex> = OnceLock::new();
static COMPLETE_RE: OnceLock<Regex> = OnceLock::new();

fn incomplete_re() -> &'static Regex {
    INCOMPLETE_RE.get_or_init(|| Regex::new(r"^\s*-\s*\[\s*\]").unwrap())
}

fn complete_re() -> &'static Regex {
    COMPLETE_RE.get_or_init(|| Regex::new(r"^\s*-\s*\[[xX]\]").unwrap())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub total: usize,
    pub complete: usize,
}

impl TaskProgress {
    pub fn incomplete(&self) -> usize {
        self.total - self.complete
    }

    pub fn has_tasks(&self) -> bool {
        self.total > 0
    }

    pub fn all_complete(&self) -> bool {
        self.has_tasks() && self.complete == self.total
    }
}

/// Count checkbox lines in `content`.
pub fn count(content: &str) -> TaskProgress {
    let mut progress = TaskProgress::default();
    for line in content.lines() {
        if incomplete_re().is_match(line) {
            progress.total += 1;
        } else if complete_re().is_match(line) {
            progress.total += 1;
            progress.complete += 1;
        }
    }
    progress
}

pub fn has_completion_marker(content: &str) -> bool {
    content.contains(COMPLETION_MARKER)
}

/// Progress and marker presence for the tasks file at `path`.
pub fn read_progress(path: &Path) -> Result<(TaskProgress, bool)> {
    let content = std::fs::read_to_string(path)?;
    Ok((count(&content), has_completion_marker(&content)))
}

/// Append [`COMPLETION_MARKER`] to `path` unless it is already there.
/// Returns true if the file was modified.
pub fn append_completion_marker(path: &Path) -> Result<bool> {
    let mut content = std::fs::read_to_string(path)?;
    if has_completion_marker(&content) {
        return Ok(false);
    }
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push('\n');
    content.push_str(COMPLETION_MARKER);
    content.push('\n');
    crate::io::atomic_write(path, content.as_bytes())?;
    tracing::info!(path = %path.display(), "appended completion marker");
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
