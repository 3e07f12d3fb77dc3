use crate::error::KitError;
use crate::paths;
use crate::progress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Spec,
    Plan,
    Tasks,
    Implement,
    Reflect,
    Complete,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Spec,
            Phase::Plan,
            Phase::Tasks,
            Phase::Implement,
            Phase::Reflect,
            Phase::Complete,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Phase> {
        Phase::all().get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Spec => "spec",
            Phase::Plan => "plan",
            Phase::Tasks => "tasks",
            Phase::Implement => "implement",
            Phase::Reflect => "reflect",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(Phase::Spec),
            "plan" => Ok(Phase::Plan),
            "tasks" => Ok(Phase::Tasks),
            "implement" => Ok(Phase::Implement),
            "reflect" => Ok(Phase::Reflect),
            "complete" => Ok(Phase::Complete),
            _ => Err(KitError::InvalidPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Infer the pipeline phase of the feature directory at `feature_dir`.
///
/// Pure function of what is on disk: no state is stored and nothing is
/// written. A directory with no documents is in [`Phase::Spec`].
pub fn determine_phase(feature_dir: &Path) -> Phase {
    let tasks = paths::tasks_path(feature_dir);
    if tasks.is_file() {
        return phase_from_tasks(&tasks);
    }
    if paths::plan_path(feature_dir).is_file() {
        return Phase::Plan;
    }
    Phase::Spec
}

/// Phase implied by an existing TASKS.md. An unreadable file counts as
/// having no tasks yet.
pub fn phase_from_tasks(tasks_path: &Path) -> Phase {
    let (progress, marker) = match progress::read_progress(tasks_path) {
        Ok(read) => read,
        Err(e) => {
            tracing::warn!(path = %tasks_path.display(), error = %e, "could not read tasks file");
            return Phase::Tasks;
        }
    };

    if !progress.has_tasks() {
        Phase::Tasks
    } else if progress.complete < progress.total {
        Phase::Implement
    } else if marker {
        Phase::Complete
    } else {
        Phase::Reflect
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
