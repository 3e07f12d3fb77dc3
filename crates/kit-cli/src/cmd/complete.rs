use crate::output::print_json;
use anyhow::{bail, Context};
use kit_core::{document::DocumentType, feature, phase::Phase, progress};
use std::path::Path;

pub fn run(root: &Path, reference: &str, force: bool, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let mut feature = feature::resolve(&cfg.specs_path(root), reference)?;

    let tasks_path = feature
        .require_document(DocumentType::Tasks)
        .with_context(|| format!("run 'kit tasks {}' first", feature.slug))?;

    let (tasks, _) = progress::read_progress(&tasks_path)
        .with_context(|| format!("failed to read {}", tasks_path.display()))?;
    // A stale marker does not count once a task is unchecked again.
    let already = feature.phase == Phase::Complete;
    if !already && !tasks.all_complete() && !force {
        if tasks.has_tasks() {
            bail!(
                "{} of {} task(s) still incomplete in '{}'. Finish them or pass --force",
                tasks.incomplete(),
                tasks.total,
                feature.dir_name
            );
        }
        bail!(
            "TASKS.md for '{}' has no `- [ ]` tasks yet. Add them or pass --force",
            feature.dir_name
        );
    }

    let marked = progress::append_completion_marker(&tasks_path)
        .with_context(|| format!("failed to update {}", tasks_path.display()))?;
    let phase = feature.refresh_phase();
    crate::cmd::rollup::refresh(root, &cfg);

    if json {
        return print_json(&serde_json::json!({
            "feature": feature.dir_name,
            "phase": phase,
            "marked": marked,
        }));
    }

    if already {
        println!("{} is already complete", feature.dir_name);
    } else {
        println!("Marked {} complete", feature.dir_name);
    }
    Ok(())
}
