use marx_platform_protocol::{
    EventClass, EventMethod, ModuleContainer, ModuleTypeDescriptor, PlatformModule, PlatformType,
};

/// Fully qualified annotation that marks Marx event listener methods.
pub const SUBSCRIBE_ANNOTATION: &str = "marx.api.events.Subscribe";

/// Base event class every listener parameter must extend.
const EVENT_BASE_CLASS: &str = "marx.api.events.Event";

/// Descriptor for the sources platform.
pub struct SourceModuleType;

impl ModuleTypeDescriptor for SourceModuleType {
    fn group_id(&self) -> &str {
        "marx.core"
    }

    fn artifact_id(&self) -> &str {
        "sources"
    }

    fn id(&self) -> &str {
        "SourceModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Sources
    }

    fn icon(&self) -> Option<&str> {
        Some("/icons/java_module@32px.png")
    }

    fn ignored_annotations(&self) -> Vec<String> {
        vec![SUBSCRIBE_ANNOTATION.to_string()]
    }

    fn listener_annotations(&self) -> Vec<String> {
        vec![SUBSCRIBE_ANNOTATION.to_string()]
    }

    fn create_module(&self, container: &dyn ModuleContainer) -> Box<dyn PlatformModule> {
        Box::new(SourceModule::new(container))
    }

    fn configuration_options(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "type": "object",
            "description": "Configuration for Marx source modules",
            "properties": {
                "staticListeners": {
                    "type": "boolean",
                    "description": "Allow static listener methods",
                    "default": true
                }
            },
            "additionalProperties": false
        }))
    }
}

/// A sources module. Carries the engine-facing code of a Marx module and is
/// the only platform with listener handling.
pub struct SourceModule {
    container_name: String,
    initialized: bool,
}

impl SourceModule {
    fn new(container: &dyn ModuleContainer) -> Self {
        Self {
            container_name: container.name().to_string(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl PlatformModule for SourceModule {
    fn descriptor_id(&self) -> &str {
        "SourceModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Sources
    }

    fn init(&mut self) -> anyhow::Result<()> {
        self.initialized = true;
        tracing::debug!(container = %self.container_name, "source module initialized");
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.initialized = false;
        Ok(())
    }

    fn is_event_class_valid(&self, event: &EventClass, _method: Option<&EventMethod>) -> bool {
        event.name == EVENT_BASE_CLASS
            || event
                .supertypes
                .iter()
                .any(|supertype| supertype == EVENT_BASE_CLASS)
    }

    fn write_error_message_for_event_parameter(
        &self,
        event: &EventClass,
        _method: &EventMethod,
    ) -> String {
        format!(
            "Parameter '{}' does not extend {}",
            event.name, EVENT_BASE_CLASS
        )
    }

    fn is_static_listener_supported(&self, _method: &EventMethod) -> bool {
        true
    }

    fn should_show_plugin_icon(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marx_platform_protocol::{Library, ModuleDependency, SourceType};
    use std::path::PathBuf;

    struct BareContainer;

    impl ModuleContainer for BareContainer {
        fn name(&self) -> &str {
            "sources-test"
        }

        fn is_disposed(&self) -> bool {
            false
        }

        fn library_dependencies(&self) -> Vec<Library> {
            Vec::new()
        }

        fn module_dependencies(&self) -> Vec<ModuleDependency> {
            Vec::new()
        }

        fn source_roots(&self) -> Vec<(SourceType, PathBuf)> {
            Vec::new()
        }
    }

    fn event(name: &str, supertypes: &[&str]) -> EventClass {
        EventClass {
            name: name.to_string(),
            supertypes: supertypes.iter().map(|s| s.to_string()).collect(),
            containing_class: None,
        }
    }

    #[test]
    fn accepts_subclasses_of_the_event_base() {
        let module = SourceModuleType.create_module(&BareContainer);
        assert!(module.is_event_class_valid(
            &event("EngineTickEvent", &["marx.api.events.Event"]),
            None
        ));
        assert!(!module.is_event_class_valid(&event("Runnable", &["java.lang.Runnable"]), None));
    }

    #[test]
    fn error_message_names_the_offending_class() {
        let module = SourceModuleType.create_module(&BareContainer);
        let method = EventMethod {
            name: "onTick".to_string(),
            annotations: vec![SUBSCRIBE_ANNOTATION.to_string()],
            is_static: false,
        };
        let message =
            module.write_error_message_for_event_parameter(&event("Runnable", &[]), &method);
        assert!(message.contains("Runnable"));
        assert!(message.contains("marx.api.events.Event"));
    }
}
