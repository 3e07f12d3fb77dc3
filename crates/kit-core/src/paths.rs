use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".kit.yaml";
pub const DOCS_DIR: &str = "docs";
pub const PROGRESS_SUMMARY_FILE: &str = "PROJECT_PROGRESS_SUMMARY.md";

pub const SPEC_MD: &str = "SPEC.md";
pub const PLAN_MD: &str = "PLAN.md";
pub const TASKS_MD: &str = "TASKS.md";
pub const ANALYSIS_MD: &str = "ANALYSIS.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn docs_dir(root: &Path) -> PathBuf {
    root.join(DOCS_DIR)
}

pub fn spec_path(feature_dir: &Path) -> PathBuf {
    feature_dir.join(SPEC_MD)
}

pub fn plan_path(feature_dir: &Path) -> PathBuf {
    feature_dir.join(PLAN_MD)
}

pub fn tasks_path(feature_dir: &Path) -> PathBuf {
    feature_dir.join(TASKS_MD)
}

pub fn analysis_path(feature_dir: &Path) -> PathBuf {
    feature_dir.join(ANALYSIS_MD)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
