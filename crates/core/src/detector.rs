//! Platform type auto-detection.
//!
//! Infers which platform types should be enabled for a module container from
//! its dependency graph: library markers first, then the MarxAPI module
//! naming convention. Runs at startup and again whenever the host reports a
//! dependency-root change; both entry points funnel into the same check.

use std::collections::BTreeSet;

use marx_platform_protocol::{
    ModuleContainer, PlatformType, MARX_LIBRARY_KINDS, MODULE_LIBRARY_KIND,
};

use crate::configs::facet::FacetState;
use crate::facet::MarxFacet;
use crate::types::MarxResult;

/// Name prefix that marks engine API modules.
pub const MODULE_NAME_PREFIX: &str = "MarxAPI";

#[derive(Default)]
pub struct FacetDetector;

impl FacetDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Infer the auto-enabled platform type set for a container.
    #[must_use]
    pub fn detect_types(&self, container: &dyn ModuleContainer) -> BTreeSet<PlatformType> {
        let mut kinds: BTreeSet<&'static str> = BTreeSet::new();

        for library in container.library_dependencies() {
            for kind in MARX_LIBRARY_KINDS {
                if library.is_of_kind(kind) {
                    kinds.insert(kind);
                }
            }
        }

        for dependency in container.module_dependencies() {
            if !dependency.name.starts_with(MODULE_NAME_PREFIX) {
                continue;
            }
            match &dependency.group_path {
                None => {
                    kinds.insert(MODULE_LIBRARY_KIND);
                }
                Some(group_path) => {
                    let Some(group_name) = group_path.last() else {
                        continue;
                    };
                    // The group root stands for the group itself, not a dependency
                    if &dependency.name == group_name {
                        continue;
                    }
                    kinds.insert(MODULE_LIBRARY_KIND);
                }
            }
        }

        let detected: BTreeSet<PlatformType> = kinds
            .into_iter()
            .filter_map(PlatformType::from_library_kind)
            .collect();

        tracing::debug!(
            container = %container.name(),
            detected = ?detected,
            "auto-detection completed"
        );

        detected
    }

    /// Detection path for a container with no facet yet. Returns the initial
    /// facet state when anything was detected, `None` when the module shows
    /// no Marx content.
    #[must_use]
    pub fn check_no_facet(&self, container: &dyn ModuleContainer) -> Option<FacetState> {
        let platforms = self.detect_types(container);
        if platforms.is_empty() {
            return None;
        }

        let mut state = FacetState::default();
        state.module_platforms.extend(platforms);
        Some(state)
    }

    /// Detection path for an existing facet: overwrite the auto set with the
    /// fresh detection, apply the convenience flags, reconcile.
    ///
    /// Returns whether anything was detected (an empty detection leaves the
    /// facet untouched).
    pub fn check_existing_facet(&self, facet: &mut MarxFacet) -> MarxResult<bool> {
        let platforms = self.detect_types(facet.container());
        if platforms.is_empty() {
            return Ok(false);
        }

        let state = facet.state_mut();
        state.module_platforms = platforms;

        if state.use_assets {
            state.module_platforms.insert(PlatformType::Assets);
        }
        if state.use_sources {
            state.module_platforms.insert(PlatformType::Sources);
        }
        if state.use_assets && state.use_sources {
            state.module_platforms.insert(PlatformType::Module);
        }

        facet.refresh()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marx_platform_protocol::{Library, LibraryKind, ModuleDependency, SourceType};
    use std::path::PathBuf;

    struct DepsContainer {
        libraries: Vec<Library>,
        modules: Vec<ModuleDependency>,
    }

    impl DepsContainer {
        fn new() -> Self {
            Self {
                libraries: Vec::new(),
                modules: Vec::new(),
            }
        }

        fn with_library(mut self, name: &str, kinds: &[&str]) -> Self {
            self.libraries.push(Library {
                name: name.to_string(),
                kinds: kinds
                    .iter()
                    .map(|kind| LibraryKind::new(*kind).unwrap())
                    .collect(),
            });
            self
        }

        fn with_module(mut self, name: &str, group_path: Option<&[&str]>) -> Self {
            self.modules.push(ModuleDependency {
                name: name.to_string(),
                group_path: group_path.map(|segments| {
                    segments.iter().map(|s| s.to_string()).collect()
                }),
            });
            self
        }
    }

    impl ModuleContainer for DepsContainer {
        fn name(&self) -> &str {
            "detector-test"
        }

        fn is_disposed(&self) -> bool {
            false
        }

        fn library_dependencies(&self) -> Vec<Library> {
            self.libraries.clone()
        }

        fn module_dependencies(&self) -> Vec<ModuleDependency> {
            self.modules.clone()
        }

        fn source_roots(&self) -> Vec<(SourceType, PathBuf)> {
            Vec::new()
        }
    }

    #[test]
    fn library_kinds_map_to_platform_types() {
        let container = DepsContainer::new()
            .with_library("marx-runtime", &["marx-root"])
            .with_library("marx-assets", &["assets"])
            .with_library("junit", &[]);

        let detected = FacetDetector::new().detect_types(&container);
        assert_eq!(
            detected,
            BTreeSet::from([PlatformType::Root, PlatformType::Assets])
        );
    }

    #[test]
    fn api_module_prefix_enables_module_type() {
        let container = DepsContainer::new().with_module("MarxAPI-core", None);
        let detected = FacetDetector::new().detect_types(&container);
        assert_eq!(detected, BTreeSet::from([PlatformType::Module]));
    }

    #[test]
    fn non_api_modules_are_ignored() {
        let container = DepsContainer::new().with_module("utilities", None);
        assert!(FacetDetector::new().detect_types(&container).is_empty());
    }

    #[test]
    fn group_root_module_does_not_enable_itself() {
        // A module found as the representative root of its own group is not
        // counted as a dependency target.
        let container = DepsContainer::new()
            .with_module("MarxAPI", Some(&["marx", "MarxAPI"]));
        assert!(FacetDetector::new().detect_types(&container).is_empty());
    }

    #[test]
    fn grouped_non_root_module_still_counts() {
        let container = DepsContainer::new()
            .with_module("MarxAPI-core", Some(&["marx", "MarxAPI"]));
        let detected = FacetDetector::new().detect_types(&container);
        assert_eq!(detected, BTreeSet::from([PlatformType::Module]));
    }

    #[test]
    fn empty_group_path_is_skipped() {
        let container = DepsContainer::new().with_module("MarxAPI-core", Some(&[]));
        assert!(FacetDetector::new().detect_types(&container).is_empty());
    }

    #[test]
    fn no_detection_yields_no_initial_state() {
        let container = DepsContainer::new().with_library("junit", &[]);
        assert!(FacetDetector::new().check_no_facet(&container).is_none());
    }

    #[test]
    fn convenience_flags_extend_existing_facet() {
        use crate::registry::DescriptorRegistry;
        use std::sync::Arc;

        let container = DepsContainer::new().with_library("marx-sources", &["sources"]);
        let mut state = FacetState::default();
        state.use_assets = true;
        state.use_sources = true;

        let mut facet = MarxFacet::new(
            Box::new(container),
            Arc::new(DescriptorRegistry::with_builtins()),
            state,
        );

        let detected = FacetDetector::new()
            .check_existing_facet(&mut facet)
            .expect("refresh should succeed");
        assert!(detected);

        // Module is implied by both flags but reduced away again because its
        // children are present.
        assert_eq!(
            facet.state().module_platforms,
            BTreeSet::from([PlatformType::Sources, PlatformType::Assets])
        );
        assert!(facet.is_of_type(PlatformType::Sources));
        assert!(facet.is_of_type(PlatformType::Assets));
    }

    #[test]
    fn empty_detection_leaves_existing_facet_untouched() {
        use crate::registry::DescriptorRegistry;
        use std::sync::Arc;

        let container = DepsContainer::new();
        let mut state = FacetState::default();
        state.module_platforms.insert(PlatformType::Assets);

        let mut facet = MarxFacet::new(
            Box::new(container),
            Arc::new(DescriptorRegistry::with_builtins()),
            state,
        );

        let detected = FacetDetector::new()
            .check_existing_facet(&mut facet)
            .expect("no-op check should succeed");
        assert!(!detected);
        assert_eq!(
            facet.state().module_platforms,
            BTreeSet::from([PlatformType::Assets]),
            "an empty detection must not clear the stored auto set"
        );
        assert!(
            facet.types().is_empty(),
            "an empty detection does not reconcile"
        );
    }

    #[test]
    fn detection_seeds_initial_state() {
        let container = DepsContainer::new().with_library("marx-sources", &["sources"]);
        let state = FacetDetector::new()
            .check_no_facet(&container)
            .expect("detection should produce a state");
        assert_eq!(
            state.module_platforms,
            BTreeSet::from([PlatformType::Sources])
        );
        assert!(state.user_chosen_types.is_empty());
    }
}
