use crate::document::{Document, DocumentType};
use crate::feature::Feature;
use serde::Serialize;

/// Validation outcome for one feature. Errors fail the check; warnings do not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub feature: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validate SPEC.md, PLAN.md and TASKS.md of `feature`.
///
/// A missing SPEC.md is an error; missing PLAN.md or TASKS.md only warn.
/// Every missing section is reported, not just the first.
pub fn check_feature(feature: &Feature) -> CheckReport {
    let mut report = CheckReport {
        feature: feature.dir_name.clone(),
        ..CheckReport::default()
    };

    for (doc_type, command, required) in [
        (DocumentType::Spec, "spec", true),
        (DocumentType::Plan, "plan", false),
        (DocumentType::Tasks, "tasks", false),
    ] {
        let name = doc_type.filename();
        let path = feature.path.join(name);
        if !path.is_file() {
            let msg = format!(
                "{name} not found. Run 'kit {command} {}' to create it",
                feature.slug
            );
            if required {
                report.errors.push(msg);
            } else {
                report.warnings.push(msg);
            }
            continue;
        }

        let doc = match Document::parse_file(&path, doc_type) {
            Ok(doc) => doc,
            Err(e) => {
                report.errors.push(format!("Failed to parse {name}: {e}"));
                continue;
            }
        };
        report
            .errors
            .extend(doc.validate().into_iter().map(|e| e.to_string()));
        if doc.has_unresolved_placeholders() {
            report.warnings.push(format!(
                "{name} has {} unresolved TODO placeholder(s)",
                doc.unresolved_placeholders().len()
            ));
        }
    }

    report
}
