// Specification store commands

use crate::events::{emit_serialized, SpecsChangedPayload, ViewEventEmitter, EVENT_SPECS_CHANGED};
use crate::models::{HouseSpecs, SpecOptions};
use crate::utils::ResultExt;
use std::sync::RwLock;

/// Owner of the one live specification.
///
/// Readers always get a snapshot; writers swap the whole record.
pub struct SpecsState {
    specs: RwLock<HouseSpecs>,
}

impl SpecsState {
    pub fn new(initial: HouseSpecs) -> Self {
        Self {
            specs: RwLock::new(initial),
        }
    }

    /// Current specification
    pub fn get(&self) -> Result<HouseSpecs, String> {
        self.specs
            .read()
            .map(|s| s.clone())
            .map_err(|e| format!("Failed to acquire lock: {}", e))
    }

    /// Replace the specification, returning the previous one.
    ///
    /// No validation: empty fields are legal and simply make the specs not ready.
    pub fn set(&self, next: HouseSpecs) -> Result<HouseSpecs, String> {
        let mut specs = self.specs.write().with_context("Failed to acquire lock")?;
        Ok(std::mem::replace(&mut *specs, next))
    }

    /// Apply a single form edit as a whole-record replacement.
    ///
    /// Returns `(previous, current)`.
    pub fn update_field(&self, field: &str, value: &str) -> Result<(HouseSpecs, HouseSpecs), String> {
        let mut specs = self.specs.write().with_context("Failed to acquire lock")?;
        let next = specs.with_field(field, value)?;
        let previous = std::mem::replace(&mut *specs, next.clone());
        Ok((previous, next))
    }
}

impl Default for SpecsState {
    fn default() -> Self {
        Self::new(HouseSpecs::default())
    }
}

/// Replace the specification and notify listeners
pub fn set_specs(
    state: &SpecsState,
    next: HouseSpecs,
    emitter: &dyn ViewEventEmitter,
) -> Result<HouseSpecs, String> {
    let previous = state.set(next.clone())?;
    log::debug!("Specs replaced (city: '{}' -> '{}')", previous.city, next.city);
    emit_serialized(
        emitter,
        EVENT_SPECS_CHANGED,
        SpecsChangedPayload {
            specs: next,
            field: None,
        },
    );
    Ok(previous)
}

/// Edit one field and notify listeners. Returns `(previous, current)`.
pub fn update_spec_field(
    state: &SpecsState,
    field: &str,
    value: &str,
    emitter: &dyn ViewEventEmitter,
) -> Result<(HouseSpecs, HouseSpecs), String> {
    let (previous, current) = state.update_field(field, value)?;
    emit_serialized(
        emitter,
        EVENT_SPECS_CHANGED,
        SpecsChangedPayload {
            specs: current.clone(),
            field: Some(field.to_string()),
        },
    );
    Ok((previous, current))
}

/// Option catalogues for the design form selects
pub fn get_spec_options() -> SpecOptions {
    SpecOptions::catalogue()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopEmitter;

    #[test]
    fn test_set_returns_previous() {
        let state = SpecsState::default();
        let next = HouseSpecs {
            city: "Lahore".to_string(),
            ..HouseSpecs::default()
        };

        let previous = state.set(next.clone()).unwrap();
        assert_eq!(previous.city, "Karachi");
        assert_eq!(state.get().unwrap(), next);
    }

    #[test]
    fn test_empty_city_is_stored() {
        let state = SpecsState::default();
        let (_, current) = state.update_field("city", "").unwrap();
        assert_eq!(current.city, "");
        assert!(!state.get().unwrap().is_ready());
    }

    #[test]
    fn test_failed_update_leaves_specs_untouched() {
        let state = SpecsState::default();
        assert!(update_spec_field(&state, "floors", "many", &NoopEmitter).is_err());
        assert_eq!(state.get().unwrap(), HouseSpecs::default());
    }

    #[test]
    fn test_option_catalogue() {
        let options = get_spec_options();
        assert_eq!(options.plot_sizes.len(), 5);
        assert_eq!(options.floors.len(), 3);
        assert_eq!(options.styles.len(), 7);
        assert_eq!(options.plot_sizes[2].label, "500 Sq Yards (1 Kanal)");
    }
}
