use crate::output::{print_json, relative};
use anyhow::Context;
use kit_core::{config::Config, rollup};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let path = rollup::generate(root, &cfg).context("failed to generate progress summary")?;

    if json {
        print_json(&serde_json::json!({ "path": path }))
    } else {
        println!("Updated {}", relative(root, &path));
        Ok(())
    }
}

/// Regenerate the progress summary after a command changed feature state.
/// Failure only warns; the command itself already succeeded.
pub fn refresh(root: &Path, cfg: &Config) {
    if let Err(e) = rollup::generate(root, cfg) {
        tracing::warn!(error = %e, "failed to refresh progress summary");
    }
}
