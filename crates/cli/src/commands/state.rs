use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;
use marx_core::settings::FacetSettingsModel;
use marx_platform_protocol::PlatformType;

pub fn execute(manager: &FacetManager, module: &str) -> Result<()> {
    let state = manager
        .facet_state(module)
        .ok_or_else(|| anyhow::anyhow!("Module '{}' has no facet", module))?;

    println!("{} {}", "Facet state for".bold(), module.cyan());
    println!();

    let model = FacetSettingsModel::from_state(state);
    let effective = state.effective_types();

    for ty in PlatformType::ALL {
        let toggle = model.toggle(ty);
        let mode = if toggle.auto {
            "auto".dimmed()
        } else {
            "manual".yellow()
        };
        let enabled = if effective.contains(&ty) {
            "enabled".green()
        } else {
            "disabled".dimmed()
        };
        println!("{:>8}  {}  {}", ty.id().blue().bold(), mode, enabled);
    }

    println!();
    println!(
        "{} useSources={} useAssets={}",
        "flags:".dimmed(),
        state.use_sources,
        state.use_assets
    );

    Ok(())
}
