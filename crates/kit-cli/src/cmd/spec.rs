use crate::output::{print_json, relative};
use anyhow::Context;
use kit_core::{feature, git, io, paths, templates};
use std::path::Path;

pub fn run(root: &Path, reference: &str, no_branch: bool, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let specs = cfg.specs_path(root);

    let (feature, created) = feature::ensure_exists(&cfg.feature_naming, &specs, reference)
        .with_context(|| format!("failed to prepare feature '{reference}'"))?;

    let spec_path = paths::spec_path(&feature.path);
    let written = io::write_if_missing(&spec_path, templates::SPEC)
        .with_context(|| format!("failed to write {}", spec_path.display()))?;

    let branch = if cfg.branching.enabled && !no_branch {
        let name = cfg.branch_name(feature.number, &feature.slug);
        checkout_branch(root, &name, &cfg.branching.base_branch)
    } else {
        None
    };

    crate::cmd::rollup::refresh(root, &cfg);

    if json {
        return print_json(&serde_json::json!({
            "feature": feature,
            "created": created,
            "spec": spec_path,
            "written": written,
            "branch": branch,
        }));
    }

    if created {
        println!("Created feature: {}", feature.dir_name);
    } else {
        println!("Feature: {}", feature.dir_name);
    }
    if written {
        println!("Created: {}", relative(root, &spec_path));
    } else {
        println!("Exists:  {}", relative(root, &spec_path));
    }
    if let Some(branch) = &branch {
        println!("Branch:  {branch}");
    }
    println!("\nNext: fill in SPEC.md, then run `kit plan {}`", feature.slug);
    Ok(())
}

/// Switch to the feature branch when the project is a git repository.
/// Git problems are only logged; SPEC.md is written regardless.
pub(crate) fn checkout_branch(root: &Path, name: &str, base: &str) -> Option<String> {
    if !git::is_repo(root) {
        tracing::debug!("not a git repository, skipping branch");
        return None;
    }
    match git::ensure_branch(root, name, base) {
        Ok(_) => Some(name.to_string()),
        Err(e) => {
            tracing::warn!(branch = name, error = %e, "could not check out feature branch");
            None
        }
    }
}
