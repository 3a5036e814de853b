//! Descriptor registry.
//!
//! One [`ModuleTypeDescriptor`] per instantiable platform type. The composite
//! `Module` type has no descriptor: it is tracked in facet state but never
//! materialized as an instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use marx_platform_protocol::{ModuleTypeDescriptor, PlatformType};

use crate::modules::{AssetModuleType, RootModuleType, SourceModuleType};
use crate::types::{MarxError, MarxResult};

pub struct DescriptorRegistry {
    descriptors: BTreeMap<PlatformType, Arc<dyn ModuleTypeDescriptor>>,
}

impl DescriptorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Registry with the built-in Marx descriptors registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in [
            Arc::new(RootModuleType) as Arc<dyn ModuleTypeDescriptor>,
            Arc::new(SourceModuleType),
            Arc::new(AssetModuleType),
        ] {
            // Built-in ids and platform types are distinct by construction.
            let _ = registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor.
    ///
    /// # Errors
    ///
    /// Fails when another descriptor already claims the same id or the same
    /// platform type.
    pub fn register(&mut self, descriptor: Arc<dyn ModuleTypeDescriptor>) -> MarxResult<()> {
        if self
            .descriptors
            .values()
            .any(|existing| existing.id() == descriptor.id())
        {
            return Err(MarxError::Config(format!(
                "Descriptor id '{}' is already registered",
                descriptor.id()
            )));
        }
        let platform_type = descriptor.platform_type();
        if self.descriptors.contains_key(&platform_type) {
            return Err(MarxError::Config(format!(
                "Platform type '{}' already has a descriptor",
                platform_type
            )));
        }
        self.descriptors.insert(platform_type, descriptor);
        Ok(())
    }

    #[must_use]
    pub fn descriptor_for(&self, ty: PlatformType) -> Option<Arc<dyn ModuleTypeDescriptor>> {
        self.descriptors.get(&ty).cloned()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<dyn ModuleTypeDescriptor>> {
        self.descriptors.values()
    }
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
