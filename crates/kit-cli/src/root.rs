use anyhow::Context;
use kit_core::config::{self, Config};
use std::path::{Path, PathBuf};

/// Resolve the project root directory.
///
/// Priority:
/// 1. `--root` flag / `KIT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.kit.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if let Some(dir) = config::find_project_root(&cwd) {
        return dir;
    }

    if let Some(dir) = cwd.ancestors().find(|d| d.join(".git").is_dir()) {
        return dir.to_path_buf();
    }

    cwd
}

/// Load the project config, failing with a hint when `kit init` was never run.
pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    let cfg = Config::load(root).with_context(|| format!("no kit project at {}", root.display()))?;
    for warning in cfg.validate() {
        tracing::warn!(level = ?warning.level, "{}", warning.message);
    }
    Ok(cfg)
}
