use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error("not initialized: run 'kit init'")]
    NotInitialized,

    #[error("feature '{0}' not found. Run 'kit spec {0}' to create it")]
    FeatureNotFound(String),

    #[error("feature '{slug}' already exists at {}", path.display())]
    FeatureExists { slug: String, path: PathBuf },

    #[error("invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("no feature number after {0}")]
    NumberExhausted(u64),

    #[error("unsupported feature separator '{0}': feature directories must be named <digits>-<slug>")]
    UnsupportedSeparator(String),

    #[error("{document} not found at {}", path.display())]
    MissingDocument { document: String, path: PathBuf },

    #[error("git: {0}")]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KitError>;
