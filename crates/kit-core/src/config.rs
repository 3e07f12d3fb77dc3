use crate::error::{KitError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// BranchingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    #[serde(default = "default_name_template")]
    pub name_template: String,
}

fn default_true() -> bool {
    true
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_name_template() -> String {
    "{numeric}-{slug}".to_string()
}

impl Default for BranchingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_branch: default_base_branch(),
            name_template: default_name_template(),
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureNaming
// ---------------------------------------------------------------------------

/// How feature directories are named: `{number:0width}{separator}{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureNaming {
    #[serde(default = "default_numeric_width")]
    pub numeric_width: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_numeric_width() -> usize {
    4
}

fn default_separator() -> String {
    "-".to_string()
}

impl Default for FeatureNaming {
    fn default() -> Self {
        Self {
            numeric_width: default_numeric_width(),
            separator: default_separator(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_goal_percentage")]
    pub goal_percentage: u32,
    #[serde(default = "default_specs_dir")]
    pub specs_dir: String,
    #[serde(default = "default_constitution_path")]
    pub constitution_path: String,
    #[serde(default)]
    pub allow_out_of_order: bool,
    #[serde(default = "default_agents")]
    pub agents: Vec<String>,
    #[serde(default)]
    pub branching: BranchingConfig,
    #[serde(default)]
    pub feature_naming: FeatureNaming,
}

fn default_goal_percentage() -> u32 {
    95
}

fn default_specs_dir() -> String {
    "docs/specs".to_string()
}

fn default_constitution_path() -> String {
    "docs/CONSTITUTION.md".to_string()
}

fn default_agents() -> Vec<String> {
    vec![
        "AGENTS.md".to_string(),
        "CLAUDE.md".to_string(),
        "WARP.md".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goal_percentage: default_goal_percentage(),
            specs_dir: default_specs_dir(),
            constitution_path: default_constitution_path(),
            allow_out_of_order: false,
            agents: default_agents(),
            branching: BranchingConfig::default(),
            feature_naming: FeatureNaming::default(),
        }
    }
}

impl Config {
    pub fn exists(root: &Path) -> bool {
        paths::config_path(root).is_file()
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(KitError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        // An empty file deserializes to unit, not a mapping.
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::debug!(error = %e, "using default config");
                Self::default()
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Derived paths
    // -----------------------------------------------------------------------

    pub fn specs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.specs_dir)
    }

    pub fn constitution_path(&self, root: &Path) -> PathBuf {
        root.join(&self.constitution_path)
    }

    pub fn progress_summary_path(&self, root: &Path) -> PathBuf {
        paths::docs_dir(root).join(paths::PROGRESS_SUMMARY_FILE)
    }

    /// Render `branching.name_template` for a feature.
    pub fn branch_name(&self, number: u64, slug: &str) -> String {
        let numeric = format!("{:0width$}", number, width = self.feature_naming.numeric_width);
        self.branching
            .name_template
            .replace("{numeric}", &numeric)
            .replace("{slug}", slug)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.specs_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "specs_dir is empty".to_string(),
            });
        }

        if self.feature_naming.numeric_width == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "feature_naming.numeric_width is 0; numbers will not be padded"
                    .to_string(),
            });
        }

        // Directory listing only recognizes `<digits>-<slug>`.
        if self.feature_naming.separator != "-" {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "feature_naming.separator '{}' is not '-'; new features cannot be created",
                    self.feature_naming.separator
                ),
            });
        }

        if self.goal_percentage > 100 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("goal_percentage {} exceeds 100", self.goal_percentage),
            });
        }

        if self.branching.enabled && !self.branching.name_template.contains("{slug}") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "branching.name_template has no {slug}; branch names may collide"
                    .to_string(),
            });
        }

        warnings
    }
}

/// Walk upward from `start` looking for a directory holding `.kit.yaml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| paths::config_path(dir).is_file())
        .map(Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
