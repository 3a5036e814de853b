//! Module manifest parsing.
//!
//! Every Marx metadata file (`project.marx`, `module.marx`, `sources.marx`,
//! `assets.marx`) is a TOML document with the same schema. The file *name*
//! declares the platform type; the file *contents* declare identity,
//! dependencies, libraries and source roots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::MarxResult;

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleManifest {
    pub module: ModuleSection,
    #[serde(default)]
    pub dependencies: DependenciesSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<LibraryConfig>,
    #[serde(default)]
    pub roots: RootsSection,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleSection {
    /// Maven-style group, e.g. `marx.engine`. Grouped modules form a module
    /// group whose representative root carries the last group segment as its
    /// name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Module name. Defaults to the directory name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DependenciesSection {
    /// Names of other workspace modules this module depends on. Workspace
    /// modules only, never external libraries.
    #[serde(default)]
    pub modules: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LibraryConfig {
    pub name: String,
    /// Library kind identifiers this library presents as. Marx kinds drive
    /// auto-detection; unknown kinds are carried but never matched.
    #[serde(default)]
    pub kinds: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RootsSection {
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    #[serde(default = "default_test_sources")]
    pub test_sources: Vec<String>,
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,
    #[serde(default = "default_test_resources")]
    pub test_resources: Vec<String>,
}

impl Default for RootsSection {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            test_sources: default_test_sources(),
            resources: default_resources(),
            test_resources: default_test_resources(),
        }
    }
}

fn default_sources() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_test_sources() -> Vec<String> {
    vec!["tests".to_string()]
}

fn default_resources() -> Vec<String> {
    vec!["resources".to_string()]
}

fn default_test_resources() -> Vec<String> {
    vec!["tests/resources".to_string()]
}

pub fn parse_module_manifest(toml_str: &str) -> MarxResult<ModuleManifest> {
    let manifest: ModuleManifest = toml::from_str(toml_str)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let manifest = parse_module_manifest(
            r#"
[module]
group = "marx.engine"
artifact = "engine-demo"
version = "1.0.0-SNAPSHOT"

[dependencies]
modules = ["MarxAPI-core"]

[[libraries]]
name = "marx-runtime"
kinds = ["marx-module"]

[roots]
sources = ["src/main"]
"#,
        )
        .expect("manifest should parse");

        assert_eq!(manifest.module.artifact.as_deref(), Some("engine-demo"));
        assert_eq!(manifest.dependencies.modules, vec!["MarxAPI-core"]);
        assert_eq!(manifest.libraries[0].kinds, vec!["marx-module"]);
        assert_eq!(manifest.roots.sources, vec!["src/main"]);
        // Unspecified root kinds keep their defaults.
        assert_eq!(manifest.roots.test_sources, vec!["tests"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let manifest = parse_module_manifest("[module]\nartifact = \"demo\"\n")
            .expect("minimal manifest should parse");
        assert!(manifest.dependencies.modules.is_empty());
        assert!(manifest.libraries.is_empty());
        assert_eq!(manifest.roots.resources, vec!["resources"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = parse_module_manifest("[module]\nartefact = \"typo\"\n");
        assert!(result.is_err(), "unknown manifest keys should be rejected");
    }
}
