use marx_platform_protocol::{ModuleContainer, ModuleTypeDescriptor, PlatformModule, PlatformType};

/// Descriptor for the workspace root platform.
pub struct RootModuleType;

impl ModuleTypeDescriptor for RootModuleType {
    fn group_id(&self) -> &str {
        "marx.core"
    }

    fn artifact_id(&self) -> &str {
        "root"
    }

    fn id(&self) -> &str {
        "RootModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Root
    }

    fn icon(&self) -> Option<&str> {
        Some("/icons/java_module@32px.png")
    }

    fn create_module(&self, container: &dyn ModuleContainer) -> Box<dyn PlatformModule> {
        Box::new(RootModule::new(container))
    }
}

/// A root module. It allows for multiple children and can store global
/// values inside its project.marx file.
pub struct RootModule {
    container_name: String,
    initialized: bool,
}

impl RootModule {
    fn new(container: &dyn ModuleContainer) -> Self {
        Self {
            container_name: container.name().to_string(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl PlatformModule for RootModule {
    fn descriptor_id(&self) -> &str {
        "RootModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Root
    }

    fn init(&mut self) -> anyhow::Result<()> {
        self.initialized = true;
        tracing::debug!(container = %self.container_name, "root module initialized");
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.initialized = false;
        Ok(())
    }
}
