use crate::output::print_json;
use anyhow::bail;
use kit_core::check::{self, CheckReport};
use kit_core::feature;
use std::path::Path;

pub fn run(root: &Path, reference: Option<&str>, all: bool, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let specs = cfg.specs_path(root);

    let features = if all {
        feature::list(&specs)?
    } else if let Some(r) = reference {
        vec![feature::resolve(&specs, r)?]
    } else {
        feature::active(&specs)?.into_iter().collect()
    };
    if features.is_empty() {
        bail!("no features to check. Run 'kit spec <feature>' to create one");
    }

    let reports: Vec<CheckReport> = features.iter().map(check::check_feature).collect();
    let failed = reports.iter().filter(|r| !r.passed()).count();

    if json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if failed > 0 {
        bail!("{failed} of {} feature(s) failed validation", reports.len());
    }
    Ok(())
}

fn print_report(report: &CheckReport) {
    let verdict = if report.is_clean() {
        "ok".to_string()
    } else if report.passed() {
        format!("ok ({} warning(s))", report.warnings.len())
    } else {
        format!("{} error(s)", report.errors.len())
    };
    println!("{}: {verdict}", report.feature);
    for e in &report.errors {
        println!("  error: {e}");
    }
    for w in &report.warnings {
        println!("  warn:  {w}");
    }
}
