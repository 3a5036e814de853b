//! Built-in module types for the Marx platform hierarchy.

mod assets;
mod root;
mod sources;

pub use assets::{AssetModule, AssetModuleType};
pub use root::{RootModule, RootModuleType};
pub use sources::{SourceModule, SourceModuleType};
