//! Result types for facet manager operations
//!
//! This module contains all result types returned by facet manager
//! operations, providing a centralized location for output structures.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use colored::Color;

use marx_platform_protocol::PlatformType;

/// Information about a discovered module and its facet status
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub name: String,
    pub path: PathBuf,
    pub declared_types: Vec<PlatformType>,
    pub has_facet: bool,
}

/// Result of listing modules in the workspace
#[derive(Debug)]
pub struct ModuleListResult {
    pub modules: Vec<ModuleInfo>,
    pub module_colors: HashMap<String, Color>,
}

/// What a detection pass did for one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionAction {
    /// No facet existed; detection found Marx content and created one.
    FacetCreated,
    /// A facet existed and its auto set was rewritten from detection.
    FacetUpdated,
    /// Detection found no Marx content; nothing changed.
    NoMarxContent,
}

/// Result of running detection for one module
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub module: String,
    pub detected_types: BTreeSet<PlatformType>,
    pub action: DetectionAction,
}

/// One row of the platform type table
#[derive(Debug, Clone)]
pub struct PlatformTypeInfo {
    pub platform_type: PlatformType,
    pub meta_file: &'static str,
    pub library_kind: &'static str,
    pub parent: Option<PlatformType>,
    pub descriptor_id: Option<String>,
}

/// Result of getting the dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: Option<petgraph::Graph<String, ()>>,
    pub cycles: Vec<Vec<String>>,
}
