//! Marx resource locations.
//!
//! A resource path like `demo/assets/engine/models/cube.obj` carries a
//! domain (`engine`) and an engine-relative path (`models/cube.obj`). Both
//! `assets/` and `data/` trees use the same layout.

use regex::Regex;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn resource_location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^.*?/(assets|data)/([^/]+)/(.*?)$").expect("pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    /// The resource domain, the segment after `assets/` or `data/`.
    pub domain: String,
    /// The remaining path below the domain.
    pub path: String,
}

impl ResourceLocation {
    /// Parse a file path into its resource location, when it lies under an
    /// `assets/` or `data/` tree.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let captures = resource_location_pattern().captures(path)?;
        Some(Self {
            domain: captures.get(2)?.as_str().to_string(),
            path: captures.get(3)?.as_str().to_string(),
        })
    }
}

/// The domain of the given path, when it is a resource path.
#[must_use]
pub fn marx_domain(path: &str) -> Option<String> {
    ResourceLocation::parse(path).map(|location| location.domain)
}

/// The engine-relative path of the given path, when it is a resource path.
#[must_use]
pub fn marx_path(path: &str) -> Option<String> {
    ResourceLocation::parse(path).map(|location| location.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assets_paths() {
        let location =
            ResourceLocation::parse("demo/assets/engine/models/cube.obj").expect("should parse");
        assert_eq!(location.domain, "engine");
        assert_eq!(location.path, "models/cube.obj");
    }

    #[test]
    fn parses_data_paths() {
        assert_eq!(
            marx_domain("workspace/data/demo/recipes/iron.toml").as_deref(),
            Some("demo")
        );
        assert_eq!(
            marx_path("workspace/data/demo/recipes/iron.toml").as_deref(),
            Some("recipes/iron.toml")
        );
    }

    #[test]
    fn rejects_paths_outside_resource_trees() {
        assert!(ResourceLocation::parse("src/engine/main.rs").is_none());
        assert!(marx_domain("no-slashes-at-all").is_none());
    }
}
