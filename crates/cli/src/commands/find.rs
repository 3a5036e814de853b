use std::path::Path;

use anyhow::Result;
use colored::*;
use marx_core::facet_manager::FacetManager;
use marx_platform_protocol::SourceType;

pub fn execute(manager: &mut FacetManager, module: &str, path: &str, kind: &str) -> Result<()> {
    let kind = match kind {
        "source" => SourceType::Source,
        "test-source" => SourceType::TestSource,
        "resource" => SourceType::Resource,
        "test-resource" => SourceType::TestResource,
        other => {
            return Err(anyhow::anyhow!(
                "Unknown root kind '{}' (expected source, test-source, resource or test-resource)",
                other
            ))
        }
    };

    let found = manager
        .find_file(module, Path::new(path), kind)
        .map_err(|e| anyhow::anyhow!("Failed to look up file: {}", e))?;

    match found {
        Some(location) => println!(
            "{} {}",
            "Found:".green().bold(),
            location.display().to_string().blue().bold()
        ),
        None => println!("{}", "Not found".dimmed()),
    }

    Ok(())
}
