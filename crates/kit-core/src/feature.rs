use crate::config::FeatureNaming;
use crate::document::DocumentType;
use crate::error::{KitError, Result};
use crate::phase::{self, Phase};
use crate::slug;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static FEATURE_DIR_RE: OnceLock<Regex> = OnceLock::new();

fn feature_dir_re() -> &'static Regex {
    FEATURE_DIR_RE.get_or_init(|| Regex::new(r"^(\d+)-(.+)$").unwrap())
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub number: u64,
    pub slug: String,
    pub dir_name: String,
    pub path: PathBuf,
    /// Directory modification time; only an approximation of creation.
    pub created_at: Option<DateTime<Utc>>,
    pub phase: Phase,
}

impl Feature {
    /// Zero-padded number as shown in reports, e.g. `0007`.
    pub fn id(&self) -> String {
        format!("{:04}", self.number)
    }

    /// Re-derive the phase from disk.
    pub fn refresh_phase(&mut self) -> Phase {
        self.phase = phase::determine_phase(&self.path);
        self.phase
    }

    /// Path of the feature's `doc_type` document, or `MissingDocument`.
    pub fn require_document(&self, doc_type: DocumentType) -> Result<PathBuf> {
        let path = self.path.join(doc_type.filename());
        if path.is_file() {
            Ok(path)
        } else {
            Err(KitError::MissingDocument {
                document: doc_type.filename().to_string(),
                path,
            })
        }
    }

    fn from_entry(specs_dir: &Path, dir_name: &str) -> Option<Self> {
        let (number, slug) = parse_dir_name(dir_name)?;
        let path = specs_dir.join(dir_name);
        let created_at = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        let phase = phase::determine_phase(&path);
        Some(Self {
            number,
            slug,
            dir_name: dir_name.to_string(),
            path,
            created_at,
            phase,
        })
    }
}

// ---------------------------------------------------------------------------
// Directory names
// ---------------------------------------------------------------------------

pub fn format_dir_name(naming: &FeatureNaming, number: u64, slug: &str) -> String {
    format!(
        "{:0width$}{}{}",
        number,
        naming.separator,
        slug,
        width = naming.numeric_width
    )
}

/// Split `0003-my-thing` into `(3, "my-thing")`. Any digit width is accepted.
///
/// A numeric prefix too large for `u64` is logged and treated as not a
/// feature directory.
pub fn parse_dir_name(dir_name: &str) -> Option<(u64, String)> {
    let caps = feature_dir_re().captures(dir_name)?;
    let number = match caps[1].parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(entry = %dir_name, "feature number out of range, ignoring directory");
            return None;
        }
    };
    Some((number, caps[2].to_string()))
}

// ---------------------------------------------------------------------------
// Registry operations
// ---------------------------------------------------------------------------

/// All features under `specs_dir`, ascending by number.
///
/// Entries that are not directories or do not look like `<digits>-<slug>`
/// are skipped. A missing specs directory yields an empty list.
pub fn list(specs_dir: &Path) -> Result<Vec<Feature>> {
    if !specs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut features = Vec::new();
    for entry in std::fs::read_dir(specs_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match Feature::from_entry(specs_dir, &name) {
            Some(f) => features.push(f),
            None => tracing::debug!(entry = %name, "skipping non-feature directory"),
        }
    }
    features.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.dir_name.cmp(&b.dir_name)));
    Ok(features)
}

/// Next feature number: one past the highest existing, gaps never reused.
pub fn next_number(specs_dir: &Path) -> Result<u64> {
    match list(specs_dir)?.last() {
        None => Ok(1),
        Some(f) => f
            .number
            .checked_add(1)
            .ok_or(KitError::NumberExhausted(f.number)),
    }
}

/// Feature with the highest number, if any.
pub fn active(specs_dir: &Path) -> Result<Option<Feature>> {
    Ok(list(specs_dir)?.pop())
}

pub fn find_by_dir_name(specs_dir: &Path, dir_name: &str) -> Result<Option<Feature>> {
    Ok(list(specs_dir)?.into_iter().find(|f| f.dir_name == dir_name))
}

pub fn find_by_slug(specs_dir: &Path, slug: &str) -> Result<Option<Feature>> {
    Ok(list(specs_dir)?
        .into_iter()
        .find(|f| f.slug.eq_ignore_ascii_case(slug)))
}

/// Resolve a full directory name or a bare slug (case-insensitive).
/// No partial matching.
pub fn resolve(specs_dir: &Path, reference: &str) -> Result<Feature> {
    if let Some(f) = find_by_dir_name(specs_dir, reference)? {
        return Ok(f);
    }
    find_by_slug(specs_dir, reference)?
        .ok_or_else(|| KitError::FeatureNotFound(reference.to_string()))
}

/// Create the directory for a new feature with the next free number.
///
/// Only the `-` separator is accepted; [`list`] recognizes no other.
pub fn create(naming: &FeatureNaming, specs_dir: &Path, slug: &str) -> Result<Feature> {
    if naming.separator != "-" {
        return Err(KitError::UnsupportedSeparator(naming.separator.clone()));
    }
    slug::validate_slug(slug)?;

    if let Some(existing) = find_by_slug(specs_dir, slug)? {
        return Err(KitError::FeatureExists {
            slug: slug.to_string(),
            path: existing.path,
        });
    }

    let number = next_number(specs_dir)?;
    let dir_name = format_dir_name(naming, number, slug);
    let path = specs_dir.join(&dir_name);
    crate::io::ensure_dir(&path)?;
    tracing::info!(feature = %dir_name, "created feature directory");

    Ok(Feature {
        number,
        slug: slug.to_string(),
        dir_name,
        path,
        created_at: Some(Utc::now()),
        phase: Phase::Spec,
    })
}

/// Resolve `reference`, creating the feature from its normalized form when it
/// does not exist yet. The bool is true when a feature was created.
pub fn ensure_exists(
    naming: &FeatureNaming,
    specs_dir: &Path,
    reference: &str,
) -> Result<(Feature, bool)> {
    match resolve(specs_dir, reference) {
        Ok(f) => return Ok((f, false)),
        Err(KitError::FeatureNotFound(_)) => {}
        Err(e) => return Err(e),
    }

    let slug = slug::normalize_slug(reference);
    slug::validate_slug(&slug)?;
    let feature = create(naming, specs_dir, &slug)?;
    Ok((feature, true))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
