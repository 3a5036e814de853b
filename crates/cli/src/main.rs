use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use marx_core::facet_manager::{FacetManager, FacetManagerConfig};

mod commands;

/// Marx - workspace tooling for the Marx engine
#[derive(Parser)]
#[command(name = "marx")]
#[command(about = "Facet and platform type management for Marx engine workspaces")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules in the workspace
    List,
    /// Show the platform type table
    Types,
    /// Show the persisted facet state of a module
    State {
        /// Module name
        module: String,
    },
    /// Dry-run auto-detection without changing any facet
    Detect {
        /// Module name; all modules when omitted
        module: Option<String>,
    },
    /// Run auto-detection and reconcile all facets
    Refresh,
    /// Look up a file under a module's source roots
    Find {
        /// Module name
        module: String,
        /// Relative path below a source root
        path: String,
        /// Root kind (source, test-source, resource, test-resource)
        #[arg(long, default_value = "source")]
        kind: String,
    },
    /// Scaffold a new module
    New {
        /// Artifact name of the new module
        artifact: String,
        /// Maven-style group id
        #[arg(long, default_value = "marx")]
        group: String,
        /// Initial version
        #[arg(long, default_value = "1.0.0-SNAPSHOT")]
        version: String,
        /// Platform types to declare (root, module, sources, assets)
        #[arg(long, value_delimiter = ',', default_values_t = [String::from("module"), String::from("sources")])]
        types: Vec<String>,
    },
    /// Show the module dependency graph
    Graph,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Initialize facet manager with all business logic
    let mut manager = FacetManager::new(FacetManagerConfig {
        workspace_root: cli.workspace,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize workspace: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::List => commands::list::execute(&manager),
        Commands::Types => commands::types::execute(&manager),
        Commands::State { module } => commands::state::execute(&manager, &module),
        Commands::Detect { module } => commands::detect::execute(&manager, module.as_deref()),
        Commands::Refresh => commands::refresh::execute(&mut manager),
        Commands::Find { module, path, kind } => {
            commands::find::execute(&mut manager, &module, &path, &kind)
        }
        Commands::New {
            artifact,
            group,
            version,
            types,
        } => commands::new_module::execute(&manager, &artifact, &group, &version, &types),
        Commands::Graph => commands::graph::execute(&manager),
    }
}
