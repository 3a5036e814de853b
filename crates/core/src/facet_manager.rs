//! High-level facet management interface
//!
//! This module provides the [`FacetManager`] which serves as the primary
//! interface for all facet operations over a Marx workspace. It encapsulates
//! workspace discovery, facet state persistence, auto-detection and
//! reconciliation.
//!
//! The FacetManager abstracts away the complexity of:
//! - Loading the workspace configuration
//! - Discovering module directories and their dependency graph
//! - Loading and persisting per-module facet state
//! - Funnelling startup and roots-changed triggers into one detection pass
//!
//! ## Example
//!
//! ```rust,no_run
//! use marx_core::facet_manager::{FacetManager, FacetManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> marx_core::types::MarxResult<()> {
//! let mut manager = FacetManager::new(FacetManagerConfig {
//!     workspace_root: PathBuf::from("."),
//! })?;
//!
//! // Run auto-detection and reconcile every module
//! let outcomes = manager.run_detection()?;
//!
//! // List all modules
//! let modules = manager.list_modules();
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use marx_platform_protocol::{PlatformType, SourceType};

use crate::configs::facet::{parse_facet_state, serialize_facet_state, FacetState};
use crate::configs::workspace::{parse_workspace_config, WorkspaceConfig};
use crate::container::FsModuleContainer;
use crate::detector::FacetDetector;
use crate::facet::MarxFacet;
use crate::registry::DescriptorRegistry;
use crate::results::{
    DependencyGraphResult, DetectionAction, DetectionOutcome, ModuleInfo, ModuleListResult,
    PlatformTypeInfo,
};
use crate::scaffold::ModuleScaffold;
use crate::types::{MarxError, MarxResult};
use crate::workspace::{build_dependency_graph, traverse_workspace, MarxWorkspace};

/// High-level facet manager that encapsulates all workspace facet operations
pub struct FacetManager {
    pub workspace: MarxWorkspace,
    pub workspace_config: WorkspaceConfig,
    registry: Arc<DescriptorRegistry>,
    detector: FacetDetector,
    facets: BTreeMap<String, MarxFacet>,
}

/// Configuration for initializing a facet manager
pub struct FacetManagerConfig {
    pub workspace_root: PathBuf,
}

impl FacetManager {
    /// Initialize a new facet manager from the given workspace root
    pub fn new(config: FacetManagerConfig) -> MarxResult<Self> {
        let workspace_config = Self::load_workspace_config(&config.workspace_root)?;

        let mut workspace = MarxWorkspace::new(config.workspace_root);
        traverse_workspace(&workspace_config, &mut workspace);
        build_dependency_graph(&mut workspace).map_err(MarxError::Workspace)?;

        let mut manager = Self {
            workspace,
            workspace_config,
            registry: Arc::new(DescriptorRegistry::with_builtins()),
            detector: FacetDetector::new(),
            facets: BTreeMap::new(),
        };
        manager.load_facets()?;
        Ok(manager)
    }

    /// Startup trigger: run detection once after the workspace is loaded.
    pub fn on_startup(&mut self) -> MarxResult<Vec<DetectionOutcome>> {
        self.run_detection()
    }

    /// Host notification that dependency roots changed. Debouncing is the
    /// host's concern; every call funnels into the same detection pass.
    pub fn on_roots_changed(&mut self) -> MarxResult<Vec<DetectionOutcome>> {
        self.run_detection()
    }

    /// Run one detection pass over every module and reconcile facets.
    pub fn run_detection(&mut self) -> MarxResult<Vec<DetectionOutcome>> {
        let names: Vec<String> = self
            .workspace
            .modules
            .iter()
            .map(|m| m.name.clone())
            .collect();

        let mut outcomes = Vec::new();
        for name in names {
            let action = if let Some(facet) = self.facets.get_mut(&name) {
                if self.detector.check_existing_facet(facet)? {
                    DetectionAction::FacetUpdated
                } else {
                    DetectionAction::NoMarxContent
                }
            } else {
                let container = FsModuleContainer::from_workspace(&self.workspace, &name)?;
                match self.detector.check_no_facet(&container) {
                    Some(state) => {
                        let mut facet =
                            MarxFacet::new(Box::new(container), Arc::clone(&self.registry), state);
                        facet.init_facet()?;
                        self.facets.insert(name.clone(), facet);
                        DetectionAction::FacetCreated
                    }
                    None => DetectionAction::NoMarxContent,
                }
            };

            let detected_types = self
                .facets
                .get(&name)
                .map(|facet| facet.state().module_platforms.clone())
                .unwrap_or_default();
            outcomes.push(DetectionOutcome {
                module: name,
                detected_types,
                action,
            });
        }

        self.save_facet_states()?;
        Ok(outcomes)
    }

    /// Dry-run detection for a single module, without touching any facet.
    pub fn detect_module(&self, module_name: &str) -> MarxResult<BTreeSet<PlatformType>> {
        let container = FsModuleContainer::from_workspace(&self.workspace, module_name)?;
        Ok(self.detector.detect_types(&container))
    }

    /// List all modules in the workspace
    #[must_use]
    pub fn list_modules(&self) -> ModuleListResult {
        let modules = self
            .workspace
            .modules
            .iter()
            .map(|module| ModuleInfo {
                name: module.name.clone(),
                path: module.module_dir.clone(),
                declared_types: module.declared_types.iter().copied().collect(),
                has_facet: self.facets.contains_key(&module.name),
            })
            .collect();

        ModuleListResult {
            modules,
            module_colors: self.module_colors(),
        }
    }

    #[must_use]
    pub fn facet_state(&self, module_name: &str) -> Option<&FacetState> {
        self.facets.get(module_name).map(MarxFacet::state)
    }

    #[must_use]
    pub fn facet(&self, module_name: &str) -> Option<&MarxFacet> {
        self.facets.get(module_name)
    }

    pub fn facet_mut(&mut self, module_name: &str) -> Option<&mut MarxFacet> {
        self.facets.get_mut(module_name)
    }

    /// The platform type table with registered descriptor ids.
    #[must_use]
    pub fn platform_types(&self) -> Vec<PlatformTypeInfo> {
        PlatformType::ALL
            .into_iter()
            .map(|ty| PlatformTypeInfo {
                platform_type: ty,
                meta_file: ty.meta_file(),
                library_kind: ty.library_kind(),
                parent: ty.parent(),
                descriptor_id: self
                    .registry
                    .descriptor_for(ty)
                    .map(|descriptor| descriptor.id().to_string()),
            })
            .collect()
    }

    /// Get dependency graph information
    #[must_use]
    pub fn dependency_graph(&self) -> DependencyGraphResult {
        DependencyGraphResult {
            graph: self.workspace.dep_graph.clone(),
            cycles: self.workspace.dependency_cycles.clone(),
        }
    }

    /// Scaffold a new module in the workspace root.
    pub fn scaffold_module(
        &self,
        scaffold: &ModuleScaffold,
        types: &BTreeSet<PlatformType>,
    ) -> MarxResult<PathBuf> {
        scaffold.create(&self.workspace.root, types)
    }

    /// Best-effort file lookup under a module's source roots.
    pub fn find_file(
        &mut self,
        module_name: &str,
        path: &Path,
        kind: SourceType,
    ) -> MarxResult<Option<PathBuf>> {
        let facet = self.facets.get_mut(module_name).ok_or_else(|| {
            MarxError::Facet(format!("Module '{}' has no facet", module_name))
        })?;
        Ok(facet.find_file(path, kind))
    }

    /// Persist every facet's state to its module directory.
    pub fn save_facet_states(&self) -> MarxResult<()> {
        for (name, facet) in &self.facets {
            let Some(module) = self.workspace.module(name) else {
                continue;
            };
            let state_dir = module.module_dir.join(".marx");
            std::fs::create_dir_all(&state_dir)?;
            let yaml = serialize_facet_state(facet.state())?;
            std::fs::write(state_dir.join("facet.yml"), yaml)?;
        }
        Ok(())
    }

    // Private helper methods

    fn load_workspace_config(workspace_root: &Path) -> MarxResult<WorkspaceConfig> {
        let workspace_config_path = workspace_root.join(".marx").join("workspace.yml");
        let content = std::fs::read_to_string(&workspace_config_path).map_err(|e| {
            MarxError::Config(format!(
                "Failed to read workspace config {}: {}",
                workspace_config_path.display(),
                e
            ))
        })?;

        parse_workspace_config(&content).map_err(|e| {
            MarxError::Config(format!(
                "Failed to parse workspace config {}: {}",
                workspace_config_path.display(),
                e
            ))
        })
    }

    fn load_facets(&mut self) -> MarxResult<()> {
        for module in &self.workspace.modules {
            let state_path = module.module_dir.join(".marx").join("facet.yml");
            if !state_path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&state_path).map_err(|e| {
                MarxError::Facet(format!(
                    "Failed to read facet state {}: {}",
                    state_path.display(),
                    e
                ))
            })?;
            let state = parse_facet_state(&content).map_err(|e| {
                MarxError::Facet(format!(
                    "Failed to parse facet state {}: {}",
                    state_path.display(),
                    e
                ))
            })?;

            let container = FsModuleContainer::from_workspace(&self.workspace, &module.name)?;
            let mut facet =
                MarxFacet::new(Box::new(container), Arc::clone(&self.registry), state);
            facet.init_facet()?;
            self.facets.insert(module.name.clone(), facet);
        }
        Ok(())
    }

    /// Generate consistent color mapping for modules
    fn module_colors(&self) -> HashMap<String, colored::Color> {
        let mut colors = HashMap::new();
        let available_colors = [
            colored::Color::Red,
            colored::Color::Green,
            colored::Color::Yellow,
            colored::Color::Blue,
            colored::Color::Magenta,
            colored::Color::Cyan,
            colored::Color::White,
            colored::Color::BrightRed,
            colored::Color::BrightGreen,
            colored::Color::BrightYellow,
            colored::Color::BrightBlue,
            colored::Color::BrightMagenta,
            colored::Color::BrightCyan,
        ];

        let mut all_modules: Vec<String> = self
            .workspace
            .modules
            .iter()
            .map(|m| m.name.clone())
            .collect();
        all_modules.sort();

        for (i, module) in all_modules.iter().enumerate() {
            let color = available_colors[i % available_colors.len()];
            colors.insert(module.clone(), color);
        }

        colors
    }
}
