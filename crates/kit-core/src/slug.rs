use crate::error::{KitError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Maximum number of hyphen-separated words in a feature slug.
pub const MAX_SLUG_WORDS: usize = 5;

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").unwrap())
}

/// Check that `slug` is lowercase kebab-case, starts with a letter and has at
/// most [`MAX_SLUG_WORDS`] words.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(invalid(slug, "slug cannot be empty"));
    }
    if !slug_re().is_match(slug) {
        return Err(invalid(
            slug,
            "slug must be lowercase kebab-case (e.g., 'my-feature-name')",
        ));
    }
    let words = slug.split('-').count();
    if words > MAX_SLUG_WORDS {
        return Err(invalid(
            slug,
            &format!("slug cannot exceed {MAX_SLUG_WORDS} words (got {words})"),
        ));
    }
    Ok(())
}

/// Turn free-form input into a slug candidate.
///
/// Never fails. The result can still be invalid (empty, starts with a digit,
/// too many words) so callers must run [`validate_slug`] on it.
pub fn normalize_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        let c = match c {
            ' ' | '_' => '-',
            c => c,
        };
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
        if !keep || (c == '-' && out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

fn invalid(slug: &str, reason: &str) -> KitError {
    KitError::InvalidSlug {
        slug: slug.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
