use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;

pub fn execute(manager: &FacetManager, module: Option<&str>) -> Result<()> {
    println!("{}", "Auto-detection (dry run)".bold().underline());

    let mut names: Vec<String> = match module {
        Some(name) => vec![name.to_string()],
        None => manager
            .list_modules()
            .modules
            .iter()
            .map(|m| m.name.clone())
            .collect(),
    };
    names.sort();

    for name in names {
        let detected = manager
            .detect_module(&name)
            .map_err(|e| anyhow::anyhow!("Failed to detect types for '{}': {}", name, e))?;

        if detected.is_empty() {
            println!("{} {}", name.cyan(), "no Marx content".dimmed());
        } else {
            let types = detected
                .iter()
                .map(|ty| ty.id())
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {}", name.blue().bold(), types.green());
        }
    }

    Ok(())
}
