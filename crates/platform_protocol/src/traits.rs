//! Core traits for the Marx facet system.
//!
//! This module defines the three seams the facet controller works against:
//! - [`ModuleContainer`] - Abstract view of a host project module
//! - [`ModuleTypeDescriptor`] - Identity and factory for one platform type
//! - [`PlatformModule`] - A live module instance with its lifecycle hooks

use crate::types::{EventClass, EventMethod, Library, ModuleDependency, PlatformType, SourceType};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Abstract view of the host project module a facet is attached to.
///
/// The facet controller, the auto-detector and the source root index only
/// ever see this interface, which keeps all of them testable without a real
/// host. A filesystem-backed implementation lives in `marx_core`; test stubs
/// implement it over plain vectors.
///
/// # Example
///
/// ```rust
/// # use marx_platform_protocol::{Library, ModuleContainer, ModuleDependency, SourceType};
/// # use std::path::PathBuf;
/// struct StubContainer;
///
/// impl ModuleContainer for StubContainer {
///     fn name(&self) -> &str {
///         "engine-demo"
///     }
///
///     fn is_disposed(&self) -> bool {
///         false
///     }
///
///     fn library_dependencies(&self) -> Vec<Library> {
///         Vec::new()
///     }
///
///     fn module_dependencies(&self) -> Vec<ModuleDependency> {
///         Vec::new()
///     }
///
///     fn source_roots(&self) -> Vec<(SourceType, PathBuf)> {
///         vec![(SourceType::Source, PathBuf::from("src"))]
///     }
/// }
/// ```
pub trait ModuleContainer {
    /// The container's name, unique within its workspace.
    fn name(&self) -> &str;

    /// Whether the container has been torn down. Reconciliation is a no-op
    /// for a disposed container.
    fn is_disposed(&self) -> bool;

    /// The transitive set of library dependencies.
    fn library_dependencies(&self) -> Vec<Library>;

    /// The transitive set of depended-on modules, excluding anything reached
    /// only through a library.
    fn module_dependencies(&self) -> Vec<ModuleDependency>;

    /// Current source roots by kind. Consumed whenever the facet rebuilds its
    /// source root index.
    fn source_roots(&self) -> Vec<(SourceType, PathBuf)>;
}

/// Identity, metadata and module factory for one platform type.
///
/// One descriptor exists per platform type that can be instantiated (`Root`,
/// `Sources`, `Assets` - the composite `Module` type has none). Descriptors
/// are singletons: created once, registered with the descriptor registry,
/// never destroyed.
pub trait ModuleTypeDescriptor {
    /// Maven-style group identifier, e.g. `marx.core`.
    fn group_id(&self) -> &str;

    /// Maven-style artifact identifier, e.g. `sources`.
    fn artifact_id(&self) -> &str;

    /// Unique descriptor id, e.g. `SourceModule`. Globally unique among
    /// registered descriptors.
    fn id(&self) -> &str;

    /// The platform type this descriptor instantiates.
    fn platform_type(&self) -> PlatformType;

    /// Asset path of the descriptor's icon, when it has one.
    fn icon(&self) -> Option<&str> {
        None
    }

    /// Whether the descriptor contributes an icon to composite display.
    fn has_icon(&self) -> bool {
        self.icon().is_some()
    }

    /// Fully qualified annotation names whose presence marks an entry point
    /// the host should not flag as unused.
    fn ignored_annotations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fully qualified annotation names that mark event listener methods.
    fn listener_annotations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Class name to color-name mapping for UI highlighting.
    fn class_color_mappings(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Build a module instance for the given container. The caller owns the
    /// returned instance and is responsible for calling
    /// [`PlatformModule::init`] once after creation.
    fn create_module(&self, container: &dyn ModuleContainer) -> Box<dyn PlatformModule>;

    /// JSON Schema describing configuration this module type accepts, when
    /// it is configurable at all.
    fn configuration_options(&self) -> Option<JsonValue> {
        None
    }

    /// Default listener method name for an event class:
    /// `EngineTickEvent` becomes `onEngineTick`.
    fn default_listener_name(&self, event: &EventClass) -> String {
        format!("on{}", event.name.replace("Event", ""))
    }

    /// Default listener name for subclassed events, folding the containing
    /// class name in for inner event classes.
    fn default_name_for_subclass_events(&self, event: &EventClass) -> String {
        let mut name = String::new();
        if let Some(containing) = &event.containing_class {
            name.push_str(&containing.replace("Event", ""));
        }

        let mut class_name = event.name.clone();
        if class_name.starts_with(&name) {
            class_name = class_name[name.len()..].to_string();
        }
        name.push_str(&class_name.replace("Event", ""));

        format!("on{}", name)
    }
}

/// A live module instance owned by a facet.
///
/// Instances are created during reconciliation when their type becomes
/// enabled, receive a single [`init`](PlatformModule::init) call after the
/// whole creation batch completes, and are disposed when the type becomes
/// disabled or the container is torn down. They are exclusively owned by the
/// facet's descriptor-to-instance table and never shared.
pub trait PlatformModule {
    /// Id of the descriptor that created this instance.
    fn descriptor_id(&self) -> &str;

    /// The platform type this instance represents.
    fn platform_type(&self) -> PlatformType;

    /// Called exactly once after creation, after all sibling creations in
    /// the same reconciliation batch.
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called when the type becomes disabled or the container is torn down.
    /// A failure here aborts disposal of the remaining set.
    fn dispose(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Whether the event class is acceptable for a listener in this module.
    /// Platforms with no listener handling of their own reject everything.
    fn is_event_class_valid(&self, _event: &EventClass, _method: Option<&EventMethod>) -> bool {
        false
    }

    /// Error message shown when a listener parameter fails validation.
    fn write_error_message_for_event_parameter(
        &self,
        _event: &EventClass,
        _method: &EventMethod,
    ) -> String {
        "Parameter does not extend the proper Event Class!".to_string()
    }

    /// Whether static listener methods are supported.
    fn is_static_listener_supported(&self, _method: &EventMethod) -> bool {
        false
    }

    /// Whether the platform icon should decorate the given element.
    fn should_show_plugin_icon(&self) -> bool {
        false
    }
}
