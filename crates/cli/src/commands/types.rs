use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;

pub fn execute(manager: &FacetManager) -> Result<()> {
    println!("{}", "Platform Types".bold().underline());

    for row in manager.platform_types() {
        println!("{}", row.platform_type.id().blue().bold());
        println!("  {} {}", "meta file:".dimmed(), row.meta_file);
        println!("  {} {}", "library kind:".dimmed(), row.library_kind);
        match row.parent {
            Some(parent) => println!("  {} {}", "parent:".dimmed(), parent.id()),
            None => println!("  {} {}", "parent:".dimmed(), "none (hierarchy root)"),
        }
        match &row.descriptor_id {
            Some(id) => println!("  {} {}", "descriptor:".dimmed(), id),
            None => println!("  {} {}", "descriptor:".dimmed(), "none (composite type)"),
        }
        println!();
    }

    Ok(())
}
