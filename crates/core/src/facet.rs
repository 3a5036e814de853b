//! The Marx facet.
//!
//! Owns the set of live platform module instances for one module container
//! and reconciles the persisted desired-type set against them. All lifecycle
//! callbacks for a given container are assumed to be serialized by the host;
//! the instance table is a plain map guarded by the `&mut self` contract.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use marx_platform_protocol::{
    EventClass, EventMethod, ModuleContainer, PlatformModule, PlatformType, SourceType,
};

use crate::configs::facet::FacetState;
use crate::registry::DescriptorRegistry;
use crate::roots::SourceRootIndex;
use crate::types::{MarxError, MarxResult};

/// Icon shown when more than one active module type contributes an icon.
const COMPOSITE_ICON: &str = "/icons/code_file@32px.png";

/// External project-view collaborator notified after reconciliation.
///
/// The host wires its own implementation; headless use keeps the no-op.
pub trait ProjectViewNotifier {
    fn refresh_view(&self) {}
}

/// Default no-op view notifier.
pub struct NoopProjectView;

impl ProjectViewNotifier for NoopProjectView {}

pub struct MarxFacet {
    container: Box<dyn ModuleContainer>,
    registry: Arc<DescriptorRegistry>,
    state: FacetState,
    module_map: HashMap<PlatformType, Box<dyn PlatformModule>>,
    roots: SourceRootIndex,
    view: Box<dyn ProjectViewNotifier>,
}

impl MarxFacet {
    #[must_use]
    pub fn new(
        container: Box<dyn ModuleContainer>,
        registry: Arc<DescriptorRegistry>,
        state: FacetState,
    ) -> Self {
        Self {
            container,
            registry,
            state,
            module_map: HashMap::new(),
            roots: SourceRootIndex::new(),
            view: Box::new(NoopProjectView),
        }
    }

    #[must_use]
    pub fn with_view_notifier(mut self, view: Box<dyn ProjectViewNotifier>) -> Self {
        self.view = view;
        self
    }

    #[must_use]
    pub fn container(&self) -> &dyn ModuleContainer {
        self.container.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> &FacetState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FacetState {
        &mut self.state
    }

    /// Called once after the facet is attached to its container.
    pub fn init_facet(&mut self) -> MarxResult<()> {
        self.refresh()
    }

    /// Tear down every live instance and drop all tracked roots.
    pub fn dispose_facet(&mut self) -> MarxResult<()> {
        for (ty, module) in &mut self.module_map {
            module
                .dispose()
                .map_err(|e| MarxError::Module(format!("Failed to dispose '{}': {}", ty, e)))?;
        }
        self.module_map.clear();
        self.roots.clear();
        Ok(())
    }

    /// Reconcile the declared desired-type set against the live instances.
    ///
    /// Removal happens before additions; every newly created instance is
    /// initialized only after the whole creation batch completes, so creation
    /// order never depends on initialization side effects of siblings.
    ///
    /// # Errors
    ///
    /// A failing disposal aborts the pass immediately, leaving the remaining
    /// instances untouched.
    pub fn refresh(&mut self) -> MarxResult<()> {
        if self.container.is_disposed() {
            return Ok(());
        }

        // Don't allow parent types with child types in the auto detected set
        self.state.module_platforms = PlatformType::remove_parents(&self.state.module_platforms);
        let all_enabled = self.state.effective_types();

        // Remove modules that aren't registered anymore
        let to_be_removed: Vec<PlatformType> = self
            .module_map
            .keys()
            .filter(|ty| !all_enabled.contains(ty))
            .copied()
            .collect();
        for ty in &to_be_removed {
            if let Some(module) = self.module_map.get_mut(ty) {
                module
                    .dispose()
                    .map_err(|e| MarxError::Module(format!("Failed to dispose '{}': {}", ty, e)))?;
            }
        }
        for ty in &to_be_removed {
            self.module_map.remove(ty);
        }

        // Do this before we register the new modules
        self.roots.rebuild(self.container.as_ref());

        // Add modules which are new
        let mut newly_enabled = Vec::new();
        for ty in &all_enabled {
            let Some(descriptor) = self.registry.descriptor_for(*ty) else {
                continue;
            };
            if self.module_map.contains_key(ty) {
                continue;
            }
            let module = descriptor.create_module(self.container.as_ref());
            self.module_map.insert(*ty, module);
            newly_enabled.push(*ty);
        }

        for ty in newly_enabled {
            if let Some(module) = self.module_map.get_mut(&ty) {
                module
                    .init()
                    .map_err(|e| MarxError::Module(format!("Failed to init '{}': {}", ty, e)))?;
            }
        }

        tracing::debug!(
            container = %self.container.name(),
            enabled = ?all_enabled,
            "facet reconciled"
        );

        self.view.refresh_view();
        Ok(())
    }

    /// Look up `path` among the roots of the requested kind. When a stale
    /// root is found the index is rebuilt exactly once and the lookup
    /// retried; a second failure reads as not-found.
    pub fn find_file(&mut self, path: impl AsRef<Path>, kind: SourceType) -> Option<PathBuf> {
        if let Ok(found) = self.roots.find_file(path.as_ref(), kind) {
            return found;
        }

        self.roots.rebuild(self.container.as_ref());

        match self.roots.find_file(path.as_ref(), kind) {
            Ok(found) => found,
            // Well we tried our best
            Err(_) => None,
        }
    }

    pub fn modules(&self) -> impl Iterator<Item = &dyn PlatformModule> {
        self.module_map.values().map(Box::as_ref)
    }

    #[must_use]
    pub fn types(&self) -> Vec<PlatformType> {
        self.module_map.keys().copied().collect()
    }

    #[must_use]
    pub fn is_of_type(&self, ty: PlatformType) -> bool {
        self.module_map.contains_key(&ty)
    }

    #[must_use]
    pub fn module_of_type(&self, ty: PlatformType) -> Option<&dyn PlatformModule> {
        self.module_map.get(&ty).map(Box::as_ref)
    }

    /// Composite icon rule: a single icon-carrying type shows its own icon,
    /// several fall back to the generic Marx icon.
    #[must_use]
    pub fn icon(&self) -> Option<String> {
        let icons: Vec<String> = self
            .module_map
            .keys()
            .filter_map(|ty| self.registry.descriptor_for(*ty))
            .filter_map(|descriptor| descriptor.icon().map(str::to_string))
            .collect();

        match icons.len() {
            0 => None,
            1 => icons.into_iter().next(),
            _ => Some(COMPOSITE_ICON.to_string()),
        }
    }

    /// Whether any live module accepts the event class for a listener.
    #[must_use]
    pub fn is_event_class_valid_for_module(&self, event: &EventClass) -> bool {
        self.module_map
            .values()
            .any(|module| module.is_event_class_valid(event, None))
    }

    #[must_use]
    pub fn is_event_class_valid(&self, event: &EventClass, method: &EventMethod) -> bool {
        self.with_listener_module(method, |module| module.is_event_class_valid(event, Some(method)))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn write_error_message_for_event(
        &self,
        event: &EventClass,
        method: &EventMethod,
    ) -> Option<String> {
        self.with_listener_module(method, |module| {
            module.write_error_message_for_event_parameter(event, method)
        })
    }

    #[must_use]
    pub fn is_static_listener_supported(&self, method: &EventMethod) -> bool {
        self.with_listener_module(method, |module| module.is_static_listener_supported(method))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn should_show_plugin_icon(&self) -> bool {
        self.module_map
            .values()
            .any(|module| module.should_show_plugin_icon())
    }

    /// Run `action` against the first live module whose descriptor declares
    /// one of the method's annotations as a listener annotation.
    fn with_listener_module<T>(
        &self,
        method: &EventMethod,
        action: impl FnOnce(&dyn PlatformModule) -> T,
    ) -> Option<T> {
        for (ty, module) in &self.module_map {
            let Some(descriptor) = self.registry.descriptor_for(*ty) else {
                continue;
            };
            let good = descriptor
                .listener_annotations()
                .iter()
                .any(|annotation| method.annotations.contains(annotation));
            if good {
                return Some(action(module.as_ref()));
            }
        }
        None
    }
}
