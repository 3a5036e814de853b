//! Marx Core Library
//!
//! This is the core library for the Marx workspace tooling. It provides all
//! the business logic for facet management: platform type reconciliation,
//! dependency-based auto-detection, facet state persistence and module
//! scaffolding.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`facet_manager`] - High-level facet management interface
//! - [`facet`] - The facet controller reconciling live module instances
//! - [`detector`] - Platform type auto-detection over dependency graphs
//! - [`workspace`] - Workspace traversal and module discovery
//! - [`container`] - Filesystem-backed module container
//! - [`registry`] - Module type descriptor registry
//! - [`modules`] - Built-in root/sources/assets module types
//! - [`settings`] - Headless facet settings model
//! - [`roots`] - Source root index with stale-root recovery
//! - [`configs`] - Workspace, manifest and facet state parsing
//! - [`scaffold`] - New-module scaffolding
//! - [`insight`] - Generic tree walking utilities
//! - [`resource`] - Marx resource location parsing
//! - [`results`] - Result types for facet manager operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The primary entry point is the [`FacetManager`] which provides a
//! high-level interface for all facet operations:
//!
//! ```rust,no_run
//! use marx_core::facet_manager::{FacetManager, FacetManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> marx_core::types::MarxResult<()> {
//! let mut manager = FacetManager::new(FacetManagerConfig {
//!     workspace_root: PathBuf::from("."),
//! })?;
//!
//! let outcomes = manager.run_detection()?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod container;
pub mod detector;
pub mod facet;
pub mod facet_manager;
pub mod insight;
pub mod modules;
pub mod registry;
pub mod resource;
pub mod results;
pub mod roots;
pub mod scaffold;
pub mod settings;
pub mod types;
pub mod workspace;

// Re-export the main types for easier usage
pub use facet_manager::{FacetManager, FacetManagerConfig};
pub use types::{MarxError, MarxResult};
