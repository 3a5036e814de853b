use marx_platform_protocol::{ModuleContainer, ModuleTypeDescriptor, PlatformModule, PlatformType};

/// Descriptor for the assets platform.
pub struct AssetModuleType;

impl ModuleTypeDescriptor for AssetModuleType {
    fn group_id(&self) -> &str {
        "marx.core"
    }

    fn artifact_id(&self) -> &str {
        "assets"
    }

    fn id(&self) -> &str {
        "AssetModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Assets
    }

    fn icon(&self) -> Option<&str> {
        Some("/icons/resource_bundle@32px.png")
    }

    fn create_module(&self, container: &dyn ModuleContainer) -> Box<dyn PlatformModule> {
        Box::new(AssetModule::new(container))
    }
}

/// An assets module. Holds textures, models and other engine resources.
pub struct AssetModule {
    container_name: String,
    initialized: bool,
}

impl AssetModule {
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

impl PlatformModule for AssetModule {
    fn descriptor_id(&self) -> &str {
        "AssetModule"
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Assets
    }

    fn init(&mut self) -> anyhow::Result<()> {
        self.initialized = true;
        tracing::debug!(container = %self.container_name, "asset module initialized");
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.initialized = false;
        Ok(())
    }
}
