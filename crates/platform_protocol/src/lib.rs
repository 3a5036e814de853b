//! Marx platform protocol.
//!
//! Contracts shared between the Marx facet core and module type descriptors:
//! the fixed [`PlatformType`] hierarchy, library kind classification, and the
//! [`ModuleContainer`] / [`ModuleTypeDescriptor`] / [`PlatformModule`] seams
//! that keep the facet system testable without a running host.

pub mod traits;
pub mod types;

pub use traits::{ModuleContainer, ModuleTypeDescriptor, PlatformModule};
pub use types::{
    EventClass, EventMethod, Library, LibraryKind, ModuleDependency, PlatformType, SourceType,
    ASSET_LIBRARY_KIND, MARX_LIBRARY_KINDS, MODULE_LIBRARY_KIND, ROOT_LIBRARY_KIND,
    SOURCE_LIBRARY_KIND,
};
