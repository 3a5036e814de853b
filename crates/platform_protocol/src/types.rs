//! Core types for the Marx platform protocol.
//!
//! This module contains the fundamental data structures shared by the facet
//! system and its module type descriptors:
//! - [`PlatformType`] - The fixed hierarchy of Marx buildable units
//! - [`LibraryKind`] / [`Library`] - Library classification for auto-detection
//! - [`SourceType`] - Source root categories tracked per module container
//! - [`EventClass`] / [`EventMethod`] - Abstract code-model handles used by
//!   listener validation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Library kind identifier for the Marx root platform.
pub const ROOT_LIBRARY_KIND: &str = "marx-root";
/// Library kind identifier for the Marx module platform.
pub const MODULE_LIBRARY_KIND: &str = "marx-module";
/// Library kind identifier for the sources platform.
pub const SOURCE_LIBRARY_KIND: &str = "sources";
/// Library kind identifier for the assets platform.
pub const ASSET_LIBRARY_KIND: &str = "assets";

/// All library kinds the auto-detector tests dependencies against.
pub const MARX_LIBRARY_KINDS: [&str; 4] = [
    ROOT_LIBRARY_KIND,
    MODULE_LIBRARY_KIND,
    SOURCE_LIBRARY_KIND,
    ASSET_LIBRARY_KIND,
];

/// A category of buildable unit in the Marx engine.
///
/// The hierarchy is fixed at compile time and immutable thereafter: exactly
/// one root with no parent, `Module` under `Root`, and the two leaf types
/// (`Sources`, `Assets`) under `Module`. Each type carries the name of the
/// metadata file that marks a directory as declaring it.
///
/// ## Hierarchy
///
/// ```text
/// Root (project.marx)
/// └── Module (module.marx)
///     ├── Sources (sources.marx)
///     └── Assets (assets.marx)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformType {
    Root,
    Module,
    Sources,
    Assets,
}

impl PlatformType {
    /// Every platform type, in hierarchy order.
    pub const ALL: [PlatformType; 4] = [
        PlatformType::Root,
        PlatformType::Module,
        PlatformType::Sources,
        PlatformType::Assets,
    ];

    /// Stable identifier used in configuration and display.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Module => "module",
            Self::Sources => "sources",
            Self::Assets => "assets",
        }
    }

    /// The metadata file that declares this platform type in a module
    /// directory. Fixed names, not user-configurable.
    #[must_use]
    pub const fn meta_file(&self) -> &'static str {
        match self {
            Self::Root => "project.marx",
            Self::Module => "module.marx",
            Self::Sources => "sources.marx",
            Self::Assets => "assets.marx",
        }
    }

    /// Parent type in the hierarchy. Only `Root` has none.
    #[must_use]
    pub const fn parent(&self) -> Option<PlatformType> {
        match self {
            Self::Root => None,
            Self::Module => Some(Self::Root),
            Self::Sources | Self::Assets => Some(Self::Module),
        }
    }

    /// The full set of types below this one in the hierarchy.
    #[must_use]
    pub const fn descendants(&self) -> &'static [PlatformType] {
        match self {
            Self::Root => &[Self::Module, Self::Sources, Self::Assets],
            Self::Module => &[Self::Sources, Self::Assets],
            Self::Sources | Self::Assets => &[],
        }
    }

    /// The library kind identifier that maps to this platform type.
    #[must_use]
    pub const fn library_kind(&self) -> &'static str {
        match self {
            Self::Root => ROOT_LIBRARY_KIND,
            Self::Module => MODULE_LIBRARY_KIND,
            Self::Sources => SOURCE_LIBRARY_KIND,
            Self::Assets => ASSET_LIBRARY_KIND,
        }
    }

    /// Resolve a library kind identifier back to its platform type.
    #[must_use]
    pub fn from_library_kind(kind: &str) -> Option<PlatformType> {
        match kind {
            ROOT_LIBRARY_KIND => Some(Self::Root),
            MODULE_LIBRARY_KIND => Some(Self::Module),
            SOURCE_LIBRARY_KIND => Some(Self::Sources),
            ASSET_LIBRARY_KIND => Some(Self::Assets),
            _ => None,
        }
    }

    /// Resolve a metadata file name back to its platform type.
    #[must_use]
    pub fn from_meta_file(file_name: &str) -> Option<PlatformType> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.meta_file() == file_name)
    }

    /// Reduce a type set to its leaf-significant cover: a type is kept iff it
    /// has no descendants, or none of its descendants appear in the set.
    ///
    /// This strips parents when any child is also present, so a module is
    /// never counted as both a leaf and a container.
    #[must_use]
    pub fn remove_parents(types: &BTreeSet<PlatformType>) -> BTreeSet<PlatformType> {
        types
            .iter()
            .filter(|ty| {
                ty.descendants().is_empty()
                    || !ty.descendants().iter().any(|child| types.contains(child))
            })
            .copied()
            .collect()
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Validated library kind identifier.
///
/// **Purpose**: Ensures kind identifiers declared in module manifests don't
/// contain whitespace. Kinds are matched by exact string against
/// [`MARX_LIBRARY_KINDS`] during auto-detection; unknown kinds are allowed
/// and simply never match.
///
/// **Example**:
/// ```rust
/// # use marx_platform_protocol::LibraryKind;
/// let kind = LibraryKind::new("marx-module").unwrap();
/// assert_eq!(kind.as_str(), "marx-module");
///
/// // Whitespace is not allowed
/// assert!(LibraryKind::new("marx module").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LibraryKind(String);

impl LibraryKind {
    /// Create a new `LibraryKind` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string contains whitespace characters.
    pub fn new(kind: impl Into<String>) -> Result<Self, String> {
        let kind = kind.into();
        if kind.chars().any(char::is_whitespace) {
            return Err(format!(
                "Library kind '{}' contains whitespace characters",
                kind
            ));
        }
        Ok(Self(kind))
    }

    /// Get the kind as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LibraryKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library dependency of a module container, with its declared kinds.
///
/// The auto-detector walks a container's transitive library set and tests
/// each library against the fixed Marx kind registry. A library "is of" a
/// kind when its declared kind list contains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    /// The library name as declared in the module manifest.
    pub name: String,

    /// Kinds this library presents as. External libraries with no Marx
    /// markers have an empty list and never influence detection.
    #[serde(default)]
    pub kinds: Vec<LibraryKind>,
}

impl Library {
    /// Whether this library presents as the given kind identifier.
    #[must_use]
    pub fn is_of_kind(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k.as_str() == kind)
    }
}

/// A module reached through a container's dependency graph.
///
/// `group_path` is the module-group path of the dependency, when it belongs
/// to a group. The detector uses it to skip a group's representative root
/// module so a module never auto-enables itself by being found as its own
/// dependency target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDependency {
    /// The dependency module's name.
    pub name: String,

    /// Group path of the dependency, outermost segment first. `None` when
    /// the module is not grouped.
    #[serde(default)]
    pub group_path: Option<Vec<String>>,
}

/// Categories of source roots tracked per module container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Source,
    TestSource,
    Resource,
    TestResource,
}

/// Abstract handle to an event class in the host code model.
///
/// The facet system never walks real syntax trees; listener validation works
/// against this flattened view of the class the host hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventClass {
    /// Simple class name, e.g. `EngineTickEvent`.
    pub name: String,

    /// Simple names of all supertypes, nearest first.
    #[serde(default)]
    pub supertypes: Vec<String>,

    /// Simple name of the lexically containing class, when the event class
    /// is an inner class.
    #[serde(default)]
    pub containing_class: Option<String>,
}

/// Abstract handle to a candidate listener method in the host code model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMethod {
    /// Method name.
    pub name: String,

    /// Fully qualified annotation names present on the method.
    #[serde(default)]
    pub annotations: Vec<String>,

    /// Whether the method is declared static.
    #[serde(default)]
    pub is_static: bool,
}
