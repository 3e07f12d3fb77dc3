use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::Local;
use kit_core::feature;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let features = feature::list(&cfg.specs_path(root)).context("failed to list features")?;

    if json {
        return print_json(&features);
    }

    if features.is_empty() {
        println!("No features yet. Run `kit spec <feature>` to create one.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = features
        .iter()
        .map(|f| {
            vec![
                f.id(),
                f.slug.clone(),
                f.phase.to_string(),
                f.created_at
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["NUMBER", "FEATURE", "PHASE", "CREATED"], &rows);
    Ok(())
}
