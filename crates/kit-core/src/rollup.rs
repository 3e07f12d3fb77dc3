//! PROJECT_PROGRESS_SUMMARY.md generation.

use crate::config::Config;
use crate::document::{self, Document, DocumentType};
use crate::error::Result;
use crate::feature::{self, Feature};
use crate::paths;
use crate::phase::Phase;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const TABLE_SUMMARY_MAX: usize = 60;

#[derive(Debug, Clone)]
pub struct FeatureSummary {
    pub id: String,
    pub name: String,
    /// Feature directory relative to the project root.
    pub path: String,
    pub phase: Phase,
    pub created: Option<DateTime<Utc>>,
    pub summary: String,
    pub intent: String,
    pub approach: String,
    pub open_items: String,
}

impl FeatureSummary {
    /// Pull the summary fields out of the feature's SPEC.md and PLAN.md.
    /// Missing or unreadable documents fall back to placeholder text.
    pub fn from_feature(feature: &Feature, specs_dir: &str) -> Self {
        let mut summary = String::new();
        let mut open_items = String::new();
        let mut approach = String::new();

        if let Ok(doc) = Document::parse_file(&paths::spec_path(&feature.path), DocumentType::Spec) {
            summary = document::first_paragraph(doc.section("PROBLEM"));
            open_items = document::first_paragraph(doc.section("OPEN-QUESTIONS"));
        }
        if let Ok(doc) = Document::parse_file(&paths::plan_path(&feature.path), DocumentType::Plan) {
            approach = document::first_paragraph(doc.section("APPROACH"));
        }

        let intent = or_default(&summary, "(see SPEC.md)");
        Self {
            id: feature.id(),
            name: feature.slug.clone(),
            path: format!("{}/{}", specs_dir.trim_end_matches('/'), feature.dir_name),
            phase: feature.phase,
            created: feature.created_at,
            summary: or_default(&summary, "(no description)"),
            intent,
            approach: or_default(&approach, "(see PLAN.md)"),
            open_items: or_default(&open_items, "none"),
        }
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Render the summary document for `summaries`.
pub fn render(summaries: &[FeatureSummary], cfg: &Config, now: DateTime<Local>) -> String {
    let mut b = String::new();

    b.push_str("# PROJECT PROGRESS SUMMARY\n\n");

    b.push_str("## FEATURE PROGRESS TABLE\n\n");
    b.push_str("| ID | FEATURE | PATH | PHASE | CREATED | SUMMARY |\n");
    b.push_str("| -- | ------- | ---- | ----- | ------- | ------- |\n");
    for s in summaries {
        let created = s
            .created
            .map(|c| c.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            b,
            "| {} | {} | `{}` | {} | {} | {} |",
            s.id,
            s.name,
            s.path,
            s.phase,
            created,
            document::truncate(&s.summary, TABLE_SUMMARY_MAX)
        );
    }
    b.push('\n');

    b.push_str("## PROJECT INTENT\n\n");
    b.push_str("<!-- TODO: describe the overall project purpose -->\n\n");

    b.push_str("## GLOBAL CONSTRAINTS\n\n");
    let _ = writeln!(
        b,
        "See `{}` for project-wide constraints and principles.\n",
        cfg.constitution_path
    );

    b.push_str("## FEATURE SUMMARIES\n\n");
    for s in summaries {
        let _ = writeln!(b, "### {}\n", s.name);
        let _ = writeln!(b, "- **STATUS**: {}", s.phase);
        let _ = writeln!(b, "- **INTENT**: {}", s.intent);
        let _ = writeln!(b, "- **APPROACH**: {}", s.approach);
        let _ = writeln!(b, "- **OPEN ITEMS**: {}", s.open_items);
        let _ = writeln!(
            b,
            "- **POINTERS**: `{0}/SPEC.md`, `{0}/PLAN.md`, `{0}/TASKS.md`\n",
            s.path
        );
    }

    b.push_str("## LAST UPDATED\n\n");
    let _ = writeln!(b, "{}", now.format("%Y-%m-%d %H:%M:%S %Z"));

    b
}

/// Regenerate the progress summary for every feature and write it.
/// Returns the path written.
pub fn generate(root: &Path, cfg: &Config) -> Result<PathBuf> {
    let features = feature::list(&cfg.specs_path(root))?;
    let summaries: Vec<FeatureSummary> = features
        .iter()
        .map(|f| FeatureSummary::from_feature(f, &cfg.specs_dir))
        .collect();

    let path = cfg.progress_summary_path(root);
    let content = render(&summaries, cfg, Local::now());
    crate::io::atomic_write(&path, content.as_bytes())?;
    tracing::debug!(path = %path.display(), features = summaries.len(), "wrote progress summary");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let cfg = Config::default();
        std::fs::create_dir_all(cfg.specs_path(dir.path())).unwrap();
        (dir, cfg)
    }

    #[test]
    fn summary_defaults_when_documents_missing() {
        let (dir, cfg) = project();
        let f = feature::create(&cfg.feature_naming, &cfg.specs_path(dir.path()), "auth").unwrap();
        let s = FeatureSummary::from_feature(&f, &cfg.specs_dir);
        assert_eq!(s.path, "docs/specs/0001-auth");
        assert_eq!(s.summary, "(no description)");
        assert_eq!(s.intent, "(see SPEC.md)");
        assert_eq!(s.approach, "(see PLAN.md)");
        assert_eq!(s.open_items, "none");
    }

    #[test]
    fn summary_reads_spec_and_plan() {
        let (dir, cfg) = project();
        let f = feature::create(&cfg.feature_naming, &cfg.specs_path(dir.path()), "auth").unwrap();
        std::fs::write(
            f.path.join("SPEC.md"),
            "## PROBLEM\n\nLogins are slow.\n\n## OPEN-QUESTIONS\n\nWhich IdP?\n",
        )
        .unwrap();
        std::fs::write(f.path.join("PLAN.md"), "## APPROACH\n\nCache sessions.\n").unwrap();

        let s = FeatureSummary::from_feature(&f, &cfg.specs_dir);
        assert_eq!(s.summary, "Logins are slow.");
        assert_eq!(s.intent, "Logins are slow.");
        assert_eq!(s.approach, "Cache sessions.");
        assert_eq!(s.open_items, "Which IdP?");
    }

    #[test]
    fn generate_writes_valid_document() {
        let (dir, cfg) = project();
        let specs = cfg.specs_path(dir.path());
        feature::create(&cfg.feature_naming, &specs, "alpha").unwrap();
        feature::create(&cfg.feature_naming, &specs, "beta").unwrap();

        let path = generate(dir.path(), &cfg).unwrap();
        assert_eq!(path, dir.path().join("docs/PROJECT_PROGRESS_SUMMARY.md"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("| 0001 | alpha | `docs/specs/0001-alpha` | spec |"));
        assert!(content.contains("### beta"));
        assert!(content.find("alpha").unwrap() < content.find("beta").unwrap());

        let doc = Document::parse(&content, "summary", DocumentType::ProjectProgressSummary);
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn render_truncates_long_table_summary() {
        let cfg = Config::default();
        let s = FeatureSummary {
            id: "0001".to_string(),
            name: "a".to_string(),
            path: "docs/specs/0001-a".to_string(),
            phase: Phase::Spec,
            created: None,
            summary: "y".repeat(100),
            intent: "i".to_string(),
            approach: "a".to_string(),
            open_items: "none".to_string(),
        };
        let out = render(&[s], &cfg, Local::now());
        let row = out.lines().find(|l| l.starts_with("| 0001")).unwrap();
        assert!(row.contains(&format!("{}...", "y".repeat(57))));
        assert!(row.contains("| - |"));
    }
}
