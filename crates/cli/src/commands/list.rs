use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;

pub fn execute(manager: &FacetManager) -> Result<()> {
    let result = manager.list_modules();

    println!("{}", "Modules".bold().underline());

    let mut modules: Vec<_> = result.modules.iter().collect();
    modules.sort_by(|a, b| a.name.cmp(&b.name));

    if modules.is_empty() {
        println!("  {}", "No modules found".dimmed());
        return Ok(());
    }

    for module in modules {
        let declared = module
            .declared_types
            .iter()
            .map(|ty| ty.id())
            .collect::<Vec<_>>()
            .join(", ");

        if module.has_facet {
            println!(
                "{} {} {}",
                module.name.blue().bold(),
                "[facet]".green(),
                format!("({})", declared).dimmed()
            );
        } else {
            println!(
                "{} {}",
                module.name.cyan(),
                format!("({})", declared).dimmed()
            );
        }
    }

    Ok(())
}
