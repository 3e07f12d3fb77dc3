//! `kit plan`, `kit tasks` and `kit analyze`: scaffold one document inside an
//! existing feature.

use crate::output::{print_json, relative};
use anyhow::Context;
use kit_core::{
    config::Config,
    document::DocumentType,
    feature::{self, Feature},
    io, templates,
};
use std::path::Path;

pub fn plan(root: &Path, reference: &str, force: bool, json: bool) -> anyhow::Result<()> {
    scaffold(root, reference, DocumentType::Plan, Some(DocumentType::Spec), force, json)
}

pub fn tasks(root: &Path, reference: &str, force: bool, json: bool) -> anyhow::Result<()> {
    scaffold(root, reference, DocumentType::Tasks, Some(DocumentType::Plan), force, json)
}

pub fn analyze(root: &Path, reference: &str, json: bool) -> anyhow::Result<()> {
    scaffold(root, reference, DocumentType::Analysis, None, false, json)
}

fn scaffold(
    root: &Path,
    reference: &str,
    doc_type: DocumentType,
    requires: Option<DocumentType>,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let feature = feature::resolve(&cfg.specs_path(root), reference)?;

    if let Some(required) = requires {
        check_prerequisite(&cfg, &feature, required, force)?;
    }

    let path = feature.path.join(doc_type.filename());
    let written = io::write_if_missing(&path, templates::for_type(doc_type))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(
        feature = %feature.dir_name,
        document = doc_type.as_str(),
        written,
        "scaffolded document"
    );

    // ANALYSIS.md does not affect the phase or the summary.
    if doc_type != DocumentType::Analysis {
        crate::cmd::rollup::refresh(root, &cfg);
    }

    if json {
        return print_json(&serde_json::json!({
            "feature": feature.dir_name,
            "document": doc_type.filename(),
            "path": path,
            "written": written,
        }));
    }

    let verb = if written { "Created:" } else { "Exists: " };
    println!("{verb} {}", relative(root, &path));
    match doc_type {
        DocumentType::Plan => {
            println!("\nNext: fill in PLAN.md, then run `kit tasks {}`", feature.slug)
        }
        DocumentType::Tasks => println!(
            "\nNext: break the plan into `- [ ]` tasks, implement them, then run `kit complete {}`",
            feature.slug
        ),
        _ => {}
    }
    Ok(())
}

/// Refuse to scaffold out of order unless forced or allowed by config.
fn check_prerequisite(
    cfg: &Config,
    feature: &Feature,
    required: DocumentType,
    force: bool,
) -> anyhow::Result<()> {
    let err = match feature.require_document(required) {
        Ok(_) => return Ok(()),
        Err(e) => e,
    };
    if force || cfg.allow_out_of_order {
        tracing::warn!(
            feature = %feature.dir_name,
            missing = required.filename(),
            "scaffolding out of order"
        );
        return Ok(());
    }
    let command = match required {
        DocumentType::Spec => "spec",
        _ => "plan",
    };
    Err(anyhow::Error::new(err).context(format!(
        "run 'kit {command} {}' first, or pass --force",
        feature.slug
    )))
}
