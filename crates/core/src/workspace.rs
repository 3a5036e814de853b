use globset::{Glob, GlobSetBuilder};
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use marx_platform_protocol::PlatformType;

use crate::configs::module::{parse_module_manifest, ModuleManifest};
use crate::configs::workspace::WorkspaceConfig;

/// A Marx workspace with its discovered modules and dependency graph
#[derive(Debug)]
pub struct MarxWorkspace {
    pub root: PathBuf,
    pub modules: Vec<DiscoveredModule>,
    pub dep_graph: Option<petgraph::Graph<String, ()>>,
    pub dependency_cycles: Vec<Vec<String>>,
}

impl MarxWorkspace {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            modules: Vec::new(),
            dep_graph: None,
            dependency_cycles: Vec::new(),
        }
    }

    #[must_use]
    pub fn module(&self, name: &str) -> Option<&DiscoveredModule> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// A module directory discovered by workspace traversal.
///
/// The metadata file names present in the directory declare its platform
/// types; all metadata files share one manifest schema, so the first parsed
/// manifest wins and later files only add declared types.
#[derive(Debug, Clone)]
pub struct DiscoveredModule {
    pub name: String,
    pub module_dir: PathBuf,
    pub declared_types: BTreeSet<PlatformType>,
    pub manifest: ModuleManifest,
}

const DEFAULT_EXCLUDE_GLOBS: &[&str] = &[
    "**/.git/**",
    "**/target/**",
    "**/node_modules/**",
    "**/.marx/**",
];

fn default_include_globs() -> Vec<String> {
    PlatformType::ALL
        .iter()
        .map(|ty| format!("**/{}", ty.meta_file()))
        .collect()
}

pub fn traverse_workspace(config: &WorkspaceConfig, workspace: &mut MarxWorkspace) {
    let include_globs = config.includes.clone().unwrap_or_default();
    let exclude_globs = config.excludes.clone().unwrap_or_default();

    // Use configured includes or default to the Marx metadata files
    let includes = if include_globs.is_empty() {
        default_include_globs()
    } else {
        include_globs
    };

    // Combine configured excludes with defaults
    let mut excludes = DEFAULT_EXCLUDE_GLOBS
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    excludes.extend(exclude_globs);

    // Build the include glob set
    let mut include_builder = GlobSetBuilder::new();
    for pattern in &includes {
        if let Ok(glob) = Glob::new(pattern) {
            include_builder.add(glob);
        }
    }
    let include_set = include_builder.build().unwrap_or_default();

    // Build the exclude glob set
    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in &excludes {
        if let Ok(glob) = Glob::new(pattern) {
            exclude_builder.add(glob);
        }
    }
    let exclude_set = exclude_builder.build().unwrap_or_default();

    let mut queue = VecDeque::new();
    queue.push_back(workspace.root.clone());

    while let Some(current_dir) = queue.pop_front() {
        if let Ok(entries) = std::fs::read_dir(&current_dir) {
            for entry in entries.flatten() {
                let path = entry.path();

                let relative_path = path.strip_prefix(&workspace.root).unwrap_or(&path);

                // Skip if explicitly excluded
                if exclude_set.is_match(relative_path) {
                    continue;
                }

                // For files, check if they match include patterns
                if path.is_file() && !include_set.is_match(relative_path) {
                    continue;
                }

                if path.is_file() {
                    on_meta_file_found(workspace, &path);
                } else if path.is_dir() {
                    queue.push_back(path);
                }
            }
        }
    }
}

fn on_meta_file_found(workspace: &mut MarxWorkspace, path: &std::path::Path) {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    let Some(declared_type) = PlatformType::from_meta_file(file_name) else {
        return;
    };
    let Some(module_dir) = path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable metadata file");
            return;
        }
    };
    let manifest = match parse_module_manifest(&contents) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping malformed metadata file");
            return;
        }
    };

    if let Some(existing) = workspace
        .modules
        .iter_mut()
        .find(|m| m.module_dir == module_dir)
    {
        existing.declared_types.insert(declared_type);
        return;
    }

    let name = manifest
        .module
        .artifact
        .clone()
        .or_else(|| {
            module_dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .unwrap_or_default();
    if name.is_empty() {
        return;
    }

    tracing::debug!(module = %name, platform_type = %declared_type, "discovered module");

    workspace.modules.push(DiscoveredModule {
        name,
        module_dir,
        declared_types: BTreeSet::from([declared_type]),
        manifest,
    });
}

/// Build the dependency graph from the modules in the workspace
pub fn build_dependency_graph(workspace: &mut MarxWorkspace) -> Result<(), String> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    // Add all modules as nodes
    for module in &workspace.modules {
        let node_index = graph.add_node(module.name.clone());
        node_indices.insert(module.name.clone(), node_index);
    }

    // Add edges for dependencies
    for module in &workspace.modules {
        let from_node = node_indices[&module.name];
        for dep in &module.manifest.dependencies.modules {
            if let Some(&to_node) = node_indices.get(dep) {
                // Add edge: module -> dependency (dependency comes first)
                graph.add_edge(from_node, to_node, ());
            } else {
                return Err(format!(
                    "Module '{}' depends on '{}' which was not found",
                    module.name, dep
                ));
            }
        }
    }

    // Detect cycles using strongly connected components
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();

    workspace.dependency_cycles = cycles;
    workspace.dep_graph = Some(graph);
    Ok(())
}

/// Get all recursive dependencies for the given targets
/// Returns dependencies in depth-first order, targets included
pub fn transitive_dependencies(
    workspace: &MarxWorkspace,
    targets: &[String],
) -> Result<Vec<String>, String> {
    let Some(graph) = workspace.dep_graph.as_ref() else {
        return Err("Dependency graph not built. Call build_dependency_graph first.".to_string());
    };

    let mut visited = HashSet::new();
    let mut result = Vec::new();
    let mut stack = Vec::new();

    // Create a reverse mapping from module names to node indices
    let mut name_to_node = HashMap::new();
    for (node_index, node_weight) in graph.node_indices().zip(graph.node_weights()) {
        name_to_node.insert(node_weight.clone(), node_index);
    }

    // Resolve targets to node indices and prime traversal structures
    let mut start_nodes = Vec::new();
    for target in targets {
        if let Some(&node_index) = name_to_node.get(target) {
            start_nodes.push(node_index);
        } else {
            return Err(format!("Target module '{}' not found in workspace", target));
        }
    }

    // Determine all nodes reachable from the targets (dependencies)
    let mut reachable_nodes = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = start_nodes.iter().copied().collect();
    while let Some(node_index) = queue.pop_front() {
        if !reachable_nodes.insert(node_index) {
            continue;
        }

        for neighbor in graph.neighbors(node_index) {
            queue.push_back(neighbor);
        }
    }

    // If cycles exist that involve reachable nodes, report them
    if !workspace.dependency_cycles.is_empty() {
        let reachable_names: HashSet<String> = reachable_nodes
            .iter()
            .map(|node| graph[*node].clone())
            .collect();

        let mut relevant_cycles: Vec<Vec<String>> = workspace
            .dependency_cycles
            .iter()
            .filter(|cycle| cycle.iter().any(|name| reachable_names.contains(name)))
            .cloned()
            .collect();

        if !relevant_cycles.is_empty() {
            relevant_cycles.sort();
            let message = relevant_cycles
                .into_iter()
                .map(|cycle| {
                    let mut cycle_path = cycle.clone();
                    if let Some(first) = cycle_path.first().cloned() {
                        cycle_path.push(first);
                    }
                    cycle_path.join(" -> ")
                })
                .collect::<Vec<_>>()
                .join("; ");

            return Err(format!("Circular dependency detected: {}", message));
        }
    }

    // Start DFS with target modules
    for node_index in start_nodes {
        stack.push(node_index);
    }

    // DFS to collect all dependencies
    while let Some(current_node) = stack.pop() {
        if visited.contains(&current_node) {
            continue;
        }
        visited.insert(current_node);

        for neighbor in graph.neighbors(current_node) {
            if !visited.contains(&neighbor) {
                stack.push(neighbor);
            }
        }

        if let Some(module_name) = graph.node_weight(current_node) {
            result.push(module_name.clone());
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn empty_config() -> WorkspaceConfig {
        WorkspaceConfig {
            name: None,
            description: None,
            includes: None,
            excludes: None,
        }
    }

    fn write_module(dir: &Path, meta_file: &str, artifact: &str, deps: &[&str]) {
        std::fs::create_dir_all(dir).unwrap();
        let dep_list = deps
            .iter()
            .map(|d| format!("\"{}\"", d))
            .collect::<Vec<_>>()
            .join(", ");
        let manifest = format!(
            "[module]\nartifact = \"{}\"\n\n[dependencies]\nmodules = [{}]\n",
            artifact, dep_list
        );
        std::fs::write(dir.join(meta_file), manifest).unwrap();
    }

    #[test]
    fn traverse_discovers_modules_by_meta_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();

        write_module(&root, "project.marx", "demo-root", &[]);
        write_module(&root.join("engine"), "module.marx", "engine", &[]);
        write_module(&root.join("engine"), "sources.marx", "engine", &[]);

        let mut workspace = MarxWorkspace::new(root);
        traverse_workspace(&empty_config(), &mut workspace);

        assert_eq!(workspace.modules.len(), 2, "two module directories expected");
        let engine = workspace.module("engine").expect("engine should be found");
        assert_eq!(
            engine.declared_types,
            BTreeSet::from([PlatformType::Module, PlatformType::Sources]),
            "both metadata files should contribute declared types"
        );
    }

    #[test]
    fn traverse_skips_excluded_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();

        write_module(&root.join("target").join("stale"), "module.marx", "stale", &[]);

        let mut workspace = MarxWorkspace::new(root);
        traverse_workspace(&empty_config(), &mut workspace);

        assert!(
            workspace.modules.is_empty(),
            "modules under target/ should be ignored"
        );
    }

    #[test]
    fn traverse_empty_dir_finds_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut workspace = MarxWorkspace::new(temp_dir.path().to_path_buf());
        traverse_workspace(&empty_config(), &mut workspace);
        assert!(workspace.modules.is_empty());
    }

    #[test]
    fn unknown_dependency_fails_graph_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        write_module(&root.join("a"), "module.marx", "a", &["missing"]);

        let mut workspace = MarxWorkspace::new(root);
        traverse_workspace(&empty_config(), &mut workspace);

        let err = build_dependency_graph(&mut workspace)
            .expect_err("unknown dependency should fail the build");
        assert!(err.contains("'missing'"));
    }

    #[test]
    fn cycle_detection_in_dependency_graph() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();

        write_module(&root.join("a"), "module.marx", "a", &["b"]);
        write_module(&root.join("b"), "module.marx", "b", &["a"]);

        let mut workspace = MarxWorkspace::new(root);
        traverse_workspace(&empty_config(), &mut workspace);

        assert_eq!(workspace.modules.len(), 2, "both modules should be tracked");

        build_dependency_graph(&mut workspace).expect("graph should build even with cycles");

        assert_eq!(
            workspace.dependency_cycles.len(),
            1,
            "one cycle should be detected"
        );
        let cycle = &workspace.dependency_cycles[0];
        assert_eq!(cycle, &vec!["a".to_string(), "b".to_string()]);

        let err = transitive_dependencies(&workspace, &["a".to_string()])
            .expect_err("cycles should prevent dependency resolution");
        assert!(
            err.contains("Circular dependency detected"),
            "error message should mention circular dependencies"
        );
        assert!(
            err.contains("a -> b -> a"),
            "cycle should be reported in message"
        );
    }

    #[test]
    fn transitive_dependencies_include_targets_and_deps() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();

        write_module(&root.join("app"), "module.marx", "app", &["lib"]);
        write_module(&root.join("lib"), "module.marx", "lib", &[]);

        let mut workspace = MarxWorkspace::new(root);
        traverse_workspace(&empty_config(), &mut workspace);
        build_dependency_graph(&mut workspace).unwrap();

        let deps = transitive_dependencies(&workspace, &["app".to_string()]).unwrap();
        assert!(deps.contains(&"app".to_string()));
        assert!(deps.contains(&"lib".to_string()));
    }
}
