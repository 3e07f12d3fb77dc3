use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Constitution,
    Spec,
    Plan,
    Tasks,
    Analysis,
    ProjectProgressSummary,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Constitution => "CONSTITUTION",
            DocumentType::Spec => "SPEC",
            DocumentType::Plan => "PLAN",
            DocumentType::Tasks => "TASKS",
            DocumentType::Analysis => "ANALYSIS",
            DocumentType::ProjectProgressSummary => "PROJECT_PROGRESS_SUMMARY",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            DocumentType::Constitution => "CONSTITUTION.md",
            DocumentType::Spec => "SPEC.md",
            DocumentType::Plan => "PLAN.md",
            DocumentType::Tasks => "TASKS.md",
            DocumentType::Analysis => "ANALYSIS.md",
            DocumentType::ProjectProgressSummary => "PROJECT_PROGRESS_SUMMARY.md",
        }
    }

    /// Level-2 sections every document of this type must contain, in order.
    pub fn required_sections(self) -> &'static [&'static str] {
        match self {
            DocumentType::Constitution => &["PRINCIPLES", "CONSTRAINTS", "NON-GOALS", "DEFINITIONS"],
            DocumentType::Spec => &[
                "PROBLEM",
                "GOALS",
                "NON-GOALS",
                "USERS",
                "REQUIREMENTS",
                "ACCEPTANCE",
                "EDGE-CASES",
                "OPEN-QUESTIONS",
            ],
            DocumentType::Plan => &[
                "SUMMARY",
                "APPROACH",
                "COMPONENTS",
                "DATA",
                "INTERFACES",
                "RISKS",
                "TESTING",
            ],
            DocumentType::Tasks => &["TASKS", "DEPENDENCIES", "NOTES"],
            DocumentType::Analysis => &[
                "UNDERSTANDING",
                "QUESTIONS",
                "RESEARCH",
                "CLARIFICATIONS",
                "ASSUMPTIONS",
                "RISKS",
            ],
            DocumentType::ProjectProgressSummary => &[
                "FEATURE PROGRESS TABLE",
                "PROJECT INTENT",
                "GLOBAL CONSTRAINTS",
                "FEATURE SUMMARIES",
                "LAST UPDATED",
            ],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static SECTION_RE: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
static LINK_RE: OnceLock<Regex> = OnceLock::new();

fn section_re() -> &'static Regex {
    SECTION_RE.get_or_init(|| Regex::new(r"(?m)^##[ \t]+(.+?)\r?$").unwrap())
}

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"<!--\s*TODO:.*?-->").unwrap())
}

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r"\[(?:SPEC|PLAN)-\d+\]").unwrap())
}

// ---------------------------------------------------------------------------
// Section / Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    /// Body between this header and the next level-2 header, trimmed.
    pub content: String,
    /// 1-based line of the header.
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub doc_type: DocumentType,
    pub path: String,
    pub content: String,
    pub sections: Vec<Section>,
}

/// A required section that is absent from a document. Validation collects
/// these instead of stopping at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub document: String,
    pub section: String,
    pub message: String,
    pub fix: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fix.is_empty() {
            write!(f, "{}: {}", self.document, self.message)
        } else {
            write!(f, "{}: {}. {}", self.document, self.message, self.fix)
        }
    }
}

impl Document {
    pub fn parse(content: &str, path: impl Into<String>, doc_type: DocumentType) -> Self {
        let headers: Vec<_> = section_re().captures_iter(content).collect();
        let mut sections = Vec::with_capacity(headers.len());

        for (i, caps) in headers.iter().enumerate() {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let body_end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(content.len());
            sections.push(Section {
                name: name.as_str().trim_end().to_string(),
                content: content[whole.end()..body_end].trim().to_string(),
                line: content[..whole.start()].matches('\n').count() + 1,
            });
        }

        Self {
            doc_type,
            path: path.into(),
            content: content.to_string(),
            sections,
        }
    }

    pub fn parse_file(path: &Path, doc_type: DocumentType) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content, path.display().to_string(), doc_type))
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        self.doc_type
            .required_sections()
            .iter()
            .filter(|req| !self.has_section(req))
            .map(|req| ValidationError {
                document: self.path.clone(),
                section: req.to_string(),
                message: format!("missing required section '{req}'"),
                fix: format!("Add a '## {req}' section to {}", self.path),
            })
            .collect()
    }

    pub fn has_unresolved_placeholders(&self) -> bool {
        placeholder_re().is_match(&self.content)
    }

    pub fn unresolved_placeholders(&self) -> Vec<&str> {
        placeholder_re()
            .find_iter(&self.content)
            .map(|m| m.as_str())
            .collect()
    }

    /// First section whose name matches case-insensitively.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Traceability references such as `[SPEC-01]` or `[PLAN-03]`.
    pub fn links(&self) -> Vec<&str> {
        link_re().find_iter(&self.content).map(|m| m.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Merge `template` into the document at `path`.
///
/// Writes the template verbatim when the file is missing. Otherwise appends
/// every template section the existing file lacks and leaves the rest of the
/// file untouched. Returns true if the file was written.
pub fn merge_template(path: &Path, template: &str, doc_type: DocumentType) -> Result<bool> {
    if !path.exists() {
        crate::io::atomic_write(path, template.as_bytes())?;
        return Ok(true);
    }

    let existing = Document::parse_file(path, doc_type)?;
    let template = Document::parse(template, "", doc_type);
    let missing: Vec<&Section> = template
        .sections
        .iter()
        .filter(|s| !existing.has_section(&s.name))
        .collect();
    if missing.is_empty() {
        return Ok(false);
    }

    let mut content = existing.content;
    for s in missing {
        content.push_str(&format!("\n\n## {}\n\n{}", s.name, s.content));
    }
    crate::io::atomic_write(path, content.as_bytes())?;
    Ok(true)
}

const FIRST_PARAGRAPH_MAX: usize = 120;

/// First non-empty paragraph of a section with comment lines skipped, joined
/// onto one line and capped at 120 characters.
pub fn first_paragraph(section: Option<&Section>) -> String {
    let Some(section) = section else {
        return String::new();
    };

    let mut lines = Vec::new();
    for line in section.content.lines().map(str::trim) {
        if line.is_empty() {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        if line.starts_with("<!--") {
            continue;
        }
        lines.push(line);
    }

    truncate(&lines.join(" "), FIRST_PARAGRAPH_MAX)
}

/// Cap `text` at `max` characters, replacing the tail with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
