use std::collections::BTreeSet;

use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;
use marx_core::scaffold::ModuleScaffold;
use marx_platform_protocol::PlatformType;

pub fn execute(
    manager: &FacetManager,
    artifact: &str,
    group: &str,
    version: &str,
    types: &[String],
) -> Result<()> {
    let mut platform_types = BTreeSet::new();
    for raw in types {
        let ty = PlatformType::ALL
            .into_iter()
            .find(|ty| ty.id() == raw)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown platform type '{}' (expected root, module, sources or assets)",
                    raw
                )
            })?;
        platform_types.insert(ty);
    }

    let scaffold = ModuleScaffold {
        group: group.to_string(),
        artifact: artifact.to_string(),
        version: version.to_string(),
    };

    let module_dir = manager
        .scaffold_module(&scaffold, &platform_types)
        .map_err(|e| anyhow::anyhow!("Failed to scaffold module: {}", e))?;

    println!(
        "{} {} {}",
        "✓".green().bold(),
        "Created module".green(),
        module_dir.display().to_string().blue().bold()
    );
    println!(
        "  {} {}",
        "declared types:".dimmed(),
        platform_types
            .iter()
            .map(|ty| ty.id())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  {}",
        "run 'marx refresh' to pick the module up".dimmed()
    );

    Ok(())
}
