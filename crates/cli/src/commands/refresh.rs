use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;
use marx_core::results::DetectionAction;

pub fn execute(manager: &mut FacetManager) -> Result<()> {
    println!("{}", "Refreshing facets".bold());
    println!();

    let outcomes = manager
        .run_detection()
        .map_err(|e| anyhow::anyhow!("Failed to run detection: {}", e))?;

    for outcome in &outcomes {
        let types = outcome
            .detected_types
            .iter()
            .map(|ty| ty.id())
            .collect::<Vec<_>>()
            .join(", ");

        match outcome.action {
            DetectionAction::FacetCreated => {
                println!(
                    "{} {} {}",
                    "+".green().bold(),
                    outcome.module.blue().bold(),
                    format!("facet created ({})", types).green()
                );
            }
            DetectionAction::FacetUpdated => {
                println!(
                    "{} {} {}",
                    "~".yellow().bold(),
                    outcome.module.blue().bold(),
                    format!("facet updated ({})", types).dimmed()
                );
            }
            DetectionAction::NoMarxContent => {
                println!(
                    "{} {} {}",
                    "-".dimmed(),
                    outcome.module.cyan(),
                    "no Marx content".dimmed()
                );
            }
        }
    }

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "All facets reconciled".green().bold()
    );

    Ok(())
}
