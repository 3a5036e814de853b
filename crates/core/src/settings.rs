//! Headless facet settings model.
//!
//! The editable view over a facet state: per platform type an "auto" toggle
//! (defer to detection) and an "enabled" toggle that is only meaningful, and
//! only editable, while auto is off. Applying writes back exactly the
//! non-auto entries, so detection stays authoritative for everything left on
//! auto.

use std::collections::BTreeMap;

use marx_platform_protocol::PlatformType;

use crate::configs::facet::FacetState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeToggle {
    pub auto: bool,
    pub enabled: bool,
    pub enabled_editable: bool,
}

#[derive(Debug, Clone)]
pub struct FacetSettingsModel {
    entries: BTreeMap<PlatformType, TypeToggle>,
}

impl FacetSettingsModel {
    /// Build the model from persisted state, as the editor's reset would.
    #[must_use]
    pub fn from_state(state: &FacetState) -> Self {
        let mut model = Self {
            entries: BTreeMap::new(),
        };
        model.reset(state);
        model
    }

    /// Reload every toggle from persisted state.
    pub fn reset(&mut self, state: &FacetState) {
        self.entries.clear();
        for ty in PlatformType::ALL {
            let auto = !state.user_chosen_types.contains_key(&ty);
            let enabled = state
                .user_chosen_types
                .get(&ty)
                .copied()
                .unwrap_or_else(|| state.module_platforms.contains(&ty));
            self.entries.insert(
                ty,
                TypeToggle {
                    auto,
                    enabled,
                    enabled_editable: !auto,
                },
            );
        }
    }

    /// Whether any toggle differs from the persisted state.
    #[must_use]
    pub fn is_modified(&self, state: &FacetState) -> bool {
        let mut modified = false;
        for (ty, toggle) in &self.entries {
            modified |= toggle.auto == state.user_chosen_types.contains_key(ty);
            modified |=
                !toggle.auto && state.user_chosen_types.get(ty) != Some(&toggle.enabled);
        }
        modified
    }

    /// Persist the non-auto entries as explicit user choices. Entries left on
    /// auto are omitted so future detection remains authoritative for them.
    pub fn apply(&self, state: &mut FacetState) {
        state.user_chosen_types.clear();
        for (ty, toggle) in &self.entries {
            if !toggle.auto {
                state.user_chosen_types.insert(*ty, toggle.enabled);
            }
        }
    }

    #[must_use]
    pub fn toggle(&self, ty: PlatformType) -> TypeToggle {
        self.entries[&ty]
    }

    /// Flip the auto toggle. Turning auto on mirrors the current detection
    /// into the enabled toggle and locks it against manual editing.
    pub fn set_auto(&mut self, ty: PlatformType, auto: bool, state: &FacetState) {
        let Some(toggle) = self.entries.get_mut(&ty) else {
            return;
        };
        toggle.auto = auto;
        if auto {
            toggle.enabled_editable = false;
            toggle.enabled = state.module_platforms.contains(&ty);
        } else {
            toggle.enabled_editable = true;
        }
    }

    /// Flip the enabled toggle and run the dependency wiring: the root and
    /// module slots are mutually exclusive, and enabling a leaf type forces
    /// its module parent on.
    pub fn set_enabled(&mut self, ty: PlatformType, enabled: bool) {
        {
            let Some(toggle) = self.entries.get_mut(&ty) else {
                return;
            };
            if !toggle.enabled_editable {
                return;
            }
            toggle.enabled = enabled;
        }

        match ty {
            PlatformType::Root => self.unique(ty, &[PlatformType::Module]),
            PlatformType::Module => self.unique(ty, &[PlatformType::Root]),
            PlatformType::Sources | PlatformType::Assets => {
                self.also(ty, &[PlatformType::Module]);
            }
        }
    }

    /// Mutual exclusion: when the first toggle is on, clear the others.
    fn unique(&mut self, selected: PlatformType, others: &[PlatformType]) {
        if !self.entries[&selected].enabled {
            return;
        }
        for other in others {
            if let Some(toggle) = self.entries.get_mut(other) {
                toggle.enabled = false;
            }
        }
    }

    /// Implication: when the first toggle is on, force the others on too.
    fn also(&mut self, selected: PlatformType, others: &[PlatformType]) {
        if !self.entries[&selected].enabled {
            return;
        }
        for other in others {
            if let Some(toggle) = self.entries.get_mut(other) {
                toggle.enabled = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn state_with(auto: &[PlatformType], user: &[(PlatformType, bool)]) -> FacetState {
        let mut state = FacetState::default();
        state.module_platforms = auto.iter().copied().collect::<BTreeSet<_>>();
        state.user_chosen_types = user.iter().copied().collect();
        state
    }

    #[test]
    fn reset_mirrors_detection_for_auto_entries() {
        let state = state_with(&[PlatformType::Sources], &[]);
        let model = FacetSettingsModel::from_state(&state);

        let sources = model.toggle(PlatformType::Sources);
        assert!(sources.auto);
        assert!(sources.enabled, "auto entries mirror detected membership");
        assert!(!sources.enabled_editable);

        let assets = model.toggle(PlatformType::Assets);
        assert!(assets.auto);
        assert!(!assets.enabled);
    }

    #[test]
    fn reset_honours_explicit_choices() {
        let state = state_with(&[PlatformType::Sources], &[(PlatformType::Sources, false)]);
        let model = FacetSettingsModel::from_state(&state);

        let sources = model.toggle(PlatformType::Sources);
        assert!(!sources.auto);
        assert!(!sources.enabled, "the explicit false wins over detection");
        assert!(sources.enabled_editable);
    }

    #[test]
    fn fresh_model_is_unmodified() {
        let state = state_with(
            &[PlatformType::Sources],
            &[(PlatformType::Assets, true)],
        );
        let model = FacetSettingsModel::from_state(&state);
        assert!(!model.is_modified(&state));
    }

    #[test]
    fn any_single_change_marks_the_model_dirty() {
        let state = state_with(&[], &[]);
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_auto(PlatformType::Assets, false, &state);
        assert!(model.is_modified(&state));
    }

    #[test]
    fn apply_persists_only_non_auto_entries() {
        let state = state_with(&[PlatformType::Sources], &[]);
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_auto(PlatformType::Assets, false, &state);
        model.set_enabled(PlatformType::Assets, true);

        let mut applied = state.clone();
        model.apply(&mut applied);

        assert_eq!(
            applied.user_chosen_types,
            BTreeMap::from([
                (PlatformType::Assets, true),
                // implied module entry stays on auto, so it is not persisted
            ])
        );
        assert!(
            !applied.user_chosen_types.contains_key(&PlatformType::Sources),
            "entries left on auto are omitted"
        );
    }

    #[test]
    fn turning_auto_on_mirrors_detection_and_locks_editing() {
        let state = state_with(&[PlatformType::Sources], &[(PlatformType::Sources, false)]);
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_auto(PlatformType::Sources, true, &state);

        let sources = model.toggle(PlatformType::Sources);
        assert!(sources.enabled, "enabled reflects auto-detected membership");
        assert!(!sources.enabled_editable);

        // Locked toggles ignore manual edits
        model.set_enabled(PlatformType::Sources, false);
        assert!(model.toggle(PlatformType::Sources).enabled);
    }

    #[test]
    fn root_and_module_are_mutually_exclusive() {
        let state = state_with(&[], &[(PlatformType::Root, false), (PlatformType::Module, true)]);
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_enabled(PlatformType::Root, true);

        assert!(model.toggle(PlatformType::Root).enabled);
        assert!(
            !model.toggle(PlatformType::Module).enabled,
            "selecting the root slot clears the module slot"
        );
    }

    #[test]
    fn enabling_a_leaf_forces_the_module_parent() {
        let state = state_with(
            &[],
            &[(PlatformType::Sources, false), (PlatformType::Module, false)],
        );
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_enabled(PlatformType::Sources, true);

        assert!(model.toggle(PlatformType::Sources).enabled);
        assert!(
            model.toggle(PlatformType::Module).enabled,
            "a leaf type implies its module parent"
        );
    }

    #[test]
    fn disabling_a_leaf_does_not_cascade() {
        let state = state_with(
            &[],
            &[(PlatformType::Sources, true), (PlatformType::Module, true)],
        );
        let mut model = FacetSettingsModel::from_state(&state);

        model.set_enabled(PlatformType::Sources, false);

        assert!(!model.toggle(PlatformType::Sources).enabled);
        assert!(
            model.toggle(PlatformType::Module).enabled,
            "implication wiring only fires on enable"
        );
    }
}
