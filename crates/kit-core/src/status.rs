use crate::document::{Document, DocumentType};
use crate::feature::Feature;
use crate::paths;
use crate::phase::Phase;
use crate::progress::{self, TaskProgress};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FileStatus {
    pub exists: bool,
    pub path: PathBuf,
}

impl FileStatus {
    fn probe(path: PathBuf) -> Self {
        Self {
            exists: path.is_file(),
            path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFiles {
    pub spec: FileStatus,
    pub plan: FileStatus,
    pub tasks: FileStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureStatus {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub phase: Phase,
    pub files: DocumentFiles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<TaskProgress>,
}

/// Gather a status snapshot for `feature`.
///
/// Best-effort: an unreadable SPEC.md leaves `summary` empty and an
/// unreadable TASKS.md leaves `progress` unset.
pub fn feature_status(feature: &Feature) -> FeatureStatus {
    let files = DocumentFiles {
        spec: FileStatus::probe(paths::spec_path(&feature.path)),
        plan: FileStatus::probe(paths::plan_path(&feature.path)),
        tasks: FileStatus::probe(paths::tasks_path(&feature.path)),
    };

    let summary = if files.spec.exists {
        extract_spec_summary(&files.spec.path).unwrap_or_default()
    } else {
        String::new()
    };

    let progress = if files.tasks.exists {
        match progress::read_progress(&files.tasks.path) {
            Ok((p, _)) if p.has_tasks() => Some(p),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %files.tasks.path.display(), error = %e, "ignoring unreadable tasks file");
                None
            }
        }
    } else {
        None
    };

    FeatureStatus {
        id: feature.id(),
        name: feature.slug.clone(),
        path: feature.path.clone(),
        summary,
        phase: crate::phase::determine_phase(&feature.path),
        files,
        progress,
    }
}

/// Text of the SUMMARY section of a SPEC.md, with comments removed.
/// Empty while the section still carries a TODO.
pub fn extract_spec_summary(spec_path: &Path) -> crate::error::Result<String> {
    let doc = Document::parse_file(spec_path, DocumentType::Spec)?;
    let Some(section) = doc.section("SUMMARY") else {
        return Ok(String::new());
    };

    let mut lines = Vec::new();
    for line in section.content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("<!--") {
            continue;
        }
        let text = match line.find("-->") {
            Some(idx) => line[idx + 3..].trim(),
            None => line,
        };
        if !text.is_empty() {
            lines.push(text);
        }
    }

    let summary = lines.join(" ");
    if summary.to_lowercase().contains("todo") {
        return Ok(String::new());
    }
    Ok(summary)
}

/// One-line suggestion for what to do next with the feature.
pub fn next_action(status: &FeatureStatus) -> String {
    if !status.files.spec.exists {
        return format!("Create specification: run `kit spec {}`", status.name);
    }
    if !status.files.plan.exists {
        return format!("Create implementation plan: run `kit plan {}`", status.name);
    }
    if !status.files.tasks.exists {
        return format!("Create task list: run `kit tasks {}`", status.name);
    }

    let tasks_path = status.files.tasks.path.display();
    match status.phase {
        Phase::Spec | Phase::Plan | Phase::Tasks => {
            format!("Define tasks with markdown checkboxes in {tasks_path}")
        }
        Phase::Implement => {
            let remaining = status.progress.map(|p| p.incomplete()).unwrap_or_default();
            format!("Complete {remaining} remaining task(s) in {tasks_path}")
        }
        Phase::Reflect => format!(
            "All tasks complete. Reflect, then run `kit complete {}`",
            status.name
        ),
        Phase::Complete => "Feature complete.".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
