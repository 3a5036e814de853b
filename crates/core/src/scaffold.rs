//! Module scaffolding.
//!
//! The headless counterpart of the new-module wizard: creates a module
//! directory, one metadata file per chosen platform type, and the
//! conventional source roots.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use marx_platform_protocol::PlatformType;

use crate::configs::module::{
    DependenciesSection, ModuleManifest, ModuleSection, RootsSection,
};
use crate::types::{MarxError, MarxResult};

/// Parameters for building a new module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScaffold {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ModuleScaffold {
    #[must_use]
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            ..Self::default()
        }
    }

    /// Create the module directory under `workspace_root` with metadata for
    /// every chosen platform type.
    ///
    /// # Errors
    ///
    /// Fails when the artifact name is empty, the directory already exists,
    /// or file creation fails.
    pub fn create(
        &self,
        workspace_root: &Path,
        types: &BTreeSet<PlatformType>,
    ) -> MarxResult<PathBuf> {
        if self.artifact.is_empty() {
            return Err(MarxError::Config(
                "Module artifact name must not be empty".to_string(),
            ));
        }
        if types.is_empty() {
            return Err(MarxError::Config(
                "At least one platform type is required".to_string(),
            ));
        }

        let module_dir = workspace_root.join(&self.artifact);
        if module_dir.exists() {
            return Err(MarxError::Path(format!(
                "Module directory {} already exists",
                module_dir.display()
            )));
        }
        std::fs::create_dir_all(&module_dir)?;

        let manifest = ModuleManifest {
            module: ModuleSection {
                group: Some(self.group.clone()),
                artifact: Some(self.artifact.clone()),
                version: Some(self.version.clone()),
            },
            dependencies: DependenciesSection::default(),
            libraries: Vec::new(),
            roots: RootsSection::default(),
        };
        let contents = toml::to_string(&manifest)
            .map_err(|e| MarxError::Config(format!("Failed to serialize manifest: {}", e)))?;

        for ty in types {
            std::fs::write(module_dir.join(ty.meta_file()), &contents)?;
        }

        for root in scaffold_roots(types, &manifest.roots) {
            std::fs::create_dir_all(module_dir.join(root))?;
        }

        tracing::info!(
            module = %self.artifact,
            dir = %module_dir.display(),
            "scaffolded module"
        );

        Ok(module_dir)
    }
}

impl Default for ModuleScaffold {
    fn default() -> Self {
        Self {
            group: "marx".to_string(),
            artifact: String::new(),
            version: "1.0.0-SNAPSHOT".to_string(),
        }
    }
}

/// The source roots implied by the chosen platform types.
fn scaffold_roots<'a>(
    types: &BTreeSet<PlatformType>,
    roots: &'a RootsSection,
) -> Vec<&'a String> {
    let mut result = Vec::new();
    if types.contains(&PlatformType::Sources) || types.contains(&PlatformType::Module) {
        result.extend(roots.sources.iter());
        result.extend(roots.test_sources.iter());
    }
    if types.contains(&PlatformType::Assets) || types.contains(&PlatformType::Module) {
        result.extend(roots.resources.iter());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::module::parse_module_manifest;

    #[test]
    fn creates_metadata_per_chosen_type() {
        let temp_dir = tempfile::tempdir().unwrap();
        let scaffold = ModuleScaffold::new("engine-demo");

        let module_dir = scaffold
            .create(
                temp_dir.path(),
                &BTreeSet::from([PlatformType::Module, PlatformType::Sources]),
            )
            .expect("scaffold should succeed");

        assert!(module_dir.join("module.marx").is_file());
        assert!(module_dir.join("sources.marx").is_file());
        assert!(!module_dir.join("assets.marx").exists());
        assert!(module_dir.join("src").is_dir());
        assert!(module_dir.join("tests").is_dir());
    }

    #[test]
    fn written_manifest_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let scaffold = ModuleScaffold::new("engine-demo");

        let module_dir = scaffold
            .create(temp_dir.path(), &BTreeSet::from([PlatformType::Module]))
            .unwrap();

        let contents = std::fs::read_to_string(module_dir.join("module.marx")).unwrap();
        let manifest = parse_module_manifest(&contents).expect("scaffolded manifest parses");
        assert_eq!(manifest.module.artifact.as_deref(), Some("engine-demo"));
        assert_eq!(manifest.module.group.as_deref(), Some("marx"));
        assert_eq!(manifest.module.version.as_deref(), Some("1.0.0-SNAPSHOT"));
    }

    #[test]
    fn refuses_existing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("taken")).unwrap();

        let err = ModuleScaffold::new("taken")
            .create(temp_dir.path(), &BTreeSet::from([PlatformType::Module]))
            .expect_err("existing directory must be refused");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn refuses_empty_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = ModuleScaffold::default()
            .create(temp_dir.path(), &BTreeSet::from([PlatformType::Module]))
            .expect_err("empty artifact must be refused");
        assert!(err.to_string().contains("artifact"));
    }
}
