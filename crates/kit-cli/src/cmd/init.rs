use crate::output::{print_json, relative};
use anyhow::Context;
use kit_core::{
    config::Config,
    document::{self, DocumentType},
    io, templates,
};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    // 1. Config
    let config_created = !Config::exists(root);
    if config_created {
        Config::default()
            .save(root)
            .context("failed to write .kit.yaml")?;
    }
    let cfg = crate::root::load_config(root)?;

    // 2. Specs directory
    let specs = cfg.specs_path(root);
    io::ensure_dir(&specs).with_context(|| format!("failed to create {}", specs.display()))?;

    // 3. Constitution: write it, or add sections an older copy lacks
    let constitution = cfg.constitution_path(root);
    let constitution_written = document::merge_template(
        &constitution,
        templates::CONSTITUTION,
        DocumentType::Constitution,
    )
    .with_context(|| format!("failed to write {}", constitution.display()))?;

    // 4. Agent pointer files, never overwritten
    let mut agents_created = Vec::new();
    for agent in &cfg.agents {
        let path = root.join(agent);
        let name = Path::new(agent)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| agent.clone());
        let content = templates::agent_pointer(&name, &cfg.constitution_path, &cfg.specs_dir);
        if io::write_if_missing(&path, &content)
            .with_context(|| format!("failed to write {}", path.display()))?
        {
            agents_created.push(agent.clone());
        }
    }

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "config_created": config_created,
            "specs_dir": specs,
            "constitution_written": constitution_written,
            "agents_created": agents_created,
        }));
    }

    println!("Initialized kit in: {}", root.display());
    if config_created {
        println!("  created  .kit.yaml");
    }
    println!("  ready    {}/", relative(root, &specs));
    if constitution_written {
        println!("  wrote    {}", relative(root, &constitution));
    }
    for agent in &agents_created {
        println!("  created  {agent}");
    }
    println!("\nNext: kit spec <feature>");
    Ok(())
}
