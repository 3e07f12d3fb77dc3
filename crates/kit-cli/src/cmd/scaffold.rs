//! `kit scaffold`: create a feature with every pipeline document at once.

use crate::output::{print_json, relative};
use anyhow::Context;
use kit_core::{document::DocumentType, feature, io, templates};
use std::path::Path;

const DOCUMENTS: [DocumentType; 4] = [
    DocumentType::Spec,
    DocumentType::Plan,
    DocumentType::Tasks,
    DocumentType::Analysis,
];

pub fn run(root: &Path, reference: &str, create_branch: bool, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let specs = cfg.specs_path(root);
    io::ensure_dir(&specs).with_context(|| format!("failed to create {}", specs.display()))?;

    let (feature, created) = feature::ensure_exists(&cfg.feature_naming, &specs, reference)
        .with_context(|| format!("failed to prepare feature '{reference}'"))?;

    let mut written = Vec::new();
    for doc_type in DOCUMENTS {
        let path = feature.path.join(doc_type.filename());
        if io::write_if_missing(&path, templates::for_type(doc_type))
            .with_context(|| format!("failed to write {}", path.display()))?
        {
            written.push(doc_type.filename());
        }
    }

    let branch = if create_branch {
        let name = cfg.branch_name(feature.number, &feature.slug);
        crate::cmd::spec::checkout_branch(root, &name, &cfg.branching.base_branch)
    } else {
        None
    };

    crate::cmd::rollup::refresh(root, &cfg);

    if json {
        return print_json(&serde_json::json!({
            "feature": feature,
            "created": created,
            "written": written,
            "branch": branch,
        }));
    }

    if created {
        println!("Created feature: {}", feature.dir_name);
    } else {
        println!("Feature: {}", feature.dir_name);
    }
    for doc_type in DOCUMENTS {
        let name = doc_type.filename();
        let state = if written.contains(&name) { "created" } else { "exists " };
        println!("  {state}  {}", relative(root, &feature.path.join(name)));
    }
    if let Some(branch) = &branch {
        println!("Branch:  {branch}");
    }
    println!("\nNext: fill in SPEC.md, then PLAN.md and TASKS.md");
    Ok(())
}
