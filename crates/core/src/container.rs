//! Filesystem-backed module container.
//!
//! The concrete [`ModuleContainer`] over a discovered workspace module. The
//! transitive dependency sets are snapshotted at construction time from the
//! workspace dependency graph; a container is considered disposed once its
//! module directory no longer exists.

use std::path::PathBuf;

use marx_platform_protocol::{Library, LibraryKind, ModuleContainer, ModuleDependency, SourceType};

use crate::configs::module::ModuleManifest;
use crate::types::{MarxError, MarxResult};
use crate::workspace::{transitive_dependencies, DiscoveredModule, MarxWorkspace};

pub struct FsModuleContainer {
    name: String,
    module_dir: PathBuf,
    libraries: Vec<Library>,
    modules: Vec<ModuleDependency>,
    source_roots: Vec<(SourceType, PathBuf)>,
}

impl FsModuleContainer {
    /// Snapshot a container for the named module from the workspace graph.
    ///
    /// # Errors
    ///
    /// Fails when the module is unknown, its dependency closure cannot be
    /// resolved (missing modules, cycles), or a manifest declares an invalid
    /// library kind.
    pub fn from_workspace(workspace: &MarxWorkspace, module_name: &str) -> MarxResult<Self> {
        let module = workspace
            .module(module_name)
            .ok_or_else(|| MarxError::Module(format!("Module '{}' not found", module_name)))?;

        let closure = transitive_dependencies(workspace, &[module.name.clone()])
            .map_err(MarxError::Workspace)?;

        let mut libraries = collect_libraries(&module.manifest)?;
        let mut modules = Vec::new();
        for dep_name in &closure {
            if dep_name == &module.name {
                continue;
            }
            let Some(dep) = workspace.module(dep_name) else {
                continue;
            };
            libraries.extend(collect_libraries(&dep.manifest)?);
            modules.push(ModuleDependency {
                name: dep.name.clone(),
                group_path: group_path_of(dep),
            });
        }

        Ok(Self {
            name: module.name.clone(),
            module_dir: module.module_dir.clone(),
            libraries,
            modules,
            source_roots: resolve_source_roots(module),
        })
    }

    #[must_use]
    pub fn module_dir(&self) -> &PathBuf {
        &self.module_dir
    }
}

impl ModuleContainer for FsModuleContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_disposed(&self) -> bool {
        !self.module_dir.is_dir()
    }

    fn library_dependencies(&self) -> Vec<Library> {
        self.libraries.clone()
    }

    fn module_dependencies(&self) -> Vec<ModuleDependency> {
        self.modules.clone()
    }

    fn source_roots(&self) -> Vec<(SourceType, PathBuf)> {
        self.source_roots.clone()
    }
}

fn collect_libraries(manifest: &ModuleManifest) -> MarxResult<Vec<Library>> {
    manifest
        .libraries
        .iter()
        .map(|library| {
            let kinds = library
                .kinds
                .iter()
                .map(|kind| {
                    LibraryKind::new(kind.clone()).map_err(MarxError::Config)
                })
                .collect::<MarxResult<Vec<_>>>()?;
            Ok(Library {
                name: library.name.clone(),
                kinds,
            })
        })
        .collect()
}

fn group_path_of(module: &DiscoveredModule) -> Option<Vec<String>> {
    module
        .manifest
        .module
        .group
        .as_ref()
        .map(|group| group.split('.').map(str::to_string).collect())
}

fn resolve_source_roots(module: &DiscoveredModule) -> Vec<(SourceType, PathBuf)> {
    let roots = &module.manifest.roots;
    let mut resolved = Vec::new();
    for (kind, relative_roots) in [
        (SourceType::Source, &roots.sources),
        (SourceType::TestSource, &roots.test_sources),
        (SourceType::Resource, &roots.resources),
        (SourceType::TestResource, &roots.test_resources),
    ] {
        for relative in relative_roots {
            resolved.push((kind, module.module_dir.join(relative)));
        }
    }
    resolved
}
