//! Persisted facet state.
//!
//! The host-serialized schema: explicit user choices per platform type, the
//! auto-detected type set, and the two convenience flags. Stored per module
//! at `<module>/.marx/facet.yml`. Absent fields default rather than error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use marx_platform_protocol::PlatformType;

use crate::types::MarxResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FacetState {
    /// Explicit user decisions. An entry always wins over auto-detection,
    /// whether it enables or disables the type.
    #[serde(default)]
    pub user_chosen_types: BTreeMap<PlatformType, bool>,

    /// Auto-detected platform types. Rewritten on every detection pass and
    /// reduced to its leaf-significant cover during reconciliation.
    #[serde(default)]
    pub module_platforms: BTreeSet<PlatformType>,

    /// Convenience flag: treat the module as carrying assets.
    #[serde(default)]
    pub use_assets: bool,

    /// Convenience flag: treat the module as carrying sources.
    #[serde(default = "default_use_sources")]
    pub use_sources: bool,
}

impl Default for FacetState {
    fn default() -> Self {
        Self {
            user_chosen_types: BTreeMap::new(),
            module_platforms: BTreeSet::new(),
            use_assets: false,
            use_sources: true,
        }
    }
}

fn default_use_sources() -> bool {
    true
}

impl FacetState {
    /// The effective enabled set: types the user explicitly turned on, plus
    /// auto-detected types the user has not explicitly decided.
    #[must_use]
    pub fn effective_types(&self) -> BTreeSet<PlatformType> {
        let user_enabled = self
            .user_chosen_types
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(ty, _)| *ty);

        let auto_enabled = self
            .module_platforms
            .iter()
            .filter(|ty| !self.user_chosen_types.contains_key(ty))
            .copied();

        user_enabled.chain(auto_enabled).collect()
    }
}

pub fn parse_facet_state(yaml_str: &str) -> MarxResult<FacetState> {
    let state: FacetState = serde_yaml::from_str(yaml_str)?;
    Ok(state)
}

pub fn serialize_facet_state(state: &FacetState) -> MarxResult<String> {
    let yaml = serde_yaml::to_string(state)?;
    Ok(yaml)
}
