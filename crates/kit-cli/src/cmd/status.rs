use crate::output::{mark, print_json, relative};
use kit_core::{feature, status};
use std::path::Path;

pub fn run(root: &Path, reference: Option<&str>, json: bool) -> anyhow::Result<()> {
    let cfg = crate::root::load_config(root)?;
    let specs = cfg.specs_path(root);

    let feature = match reference {
        Some(r) => Some(feature::resolve(&specs, r)?),
        None => feature::active(&specs)?,
    };
    let Some(feature) = feature else {
        if json {
            return print_json(&serde_json::Value::Null);
        }
        println!("No features yet. Run `kit spec <feature>` to create one.");
        return Ok(());
    };

    let st = status::feature_status(&feature);
    let next = status::next_action(&st);

    if json {
        let mut value = serde_json::to_value(&st)?;
        value["next"] = next.into();
        return print_json(&value);
    }

    println!("Feature: {} {}", st.id, st.name);
    println!("Path:    {}", relative(root, &st.path));
    if !st.summary.is_empty() {
        println!("Summary: {}", st.summary);
    }
    println!("Phase:   {}", st.phase);
    println!(
        "Docs:    SPEC {} → PLAN {} → TASKS {}",
        mark(st.files.spec.exists),
        mark(st.files.plan.exists),
        mark(st.files.tasks.exists)
    );
    if let Some(p) = st.progress {
        if p.has_tasks() {
            println!("Tasks:   {}/{} complete", p.complete, p.total);
        }
    }
    println!("\nNext: {next}");
    Ok(())
}
