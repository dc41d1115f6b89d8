//! Specification store command routing
//!
//! Handles: get_specs, set_specs, update_spec_field, get_spec_options

use crate::commands::specs;
use crate::models::{AppTab, HouseSpecs};
use serde_json::Value;

use super::{
    design_routes, estimate_routes, get_arg, pros_routes, route_sync, route_value, ServerAppState,
};

/// Check if a command is a specification command
pub fn is_specs_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "get_specs" | "set_specs" | "update_spec_field" | "get_spec_options"
    )
}

/// Route specification commands
pub async fn route_specs_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "get_specs" => route_sync!(state.specs.get()),

        "set_specs" => {
            let next: HouseSpecs = get_arg(&args, "specs")?;
            let previous =
                specs::set_specs(&state.specs, next.clone(), state.generation.emitter.as_ref())?;
            on_specs_changed(state, &previous, &next);
            route_value!(next)
        }

        "update_spec_field" => {
            let field: String = get_arg(&args, "field")?;
            let value = field_value(&args)?;
            let (previous, current) = specs::update_spec_field(
                &state.specs,
                &field,
                &value,
                state.generation.emitter.as_ref(),
            )?;
            on_specs_changed(state, &previous, &current);
            route_value!(current)
        }

        "get_spec_options" => route_value!(specs::get_spec_options()),

        _ => Err(format!("Unknown specs command: {}", cmd)),
    }
}

/// Form values arrive as strings, except `floors` which may come as a number
fn field_value(args: &Value) -> Result<String, String> {
    match args.get("value") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(format!("Invalid argument value: {}", other)),
        None => Err("Missing argument: value".to_string()),
    }
}

/// Keep the screen on display in step with the store.
///
/// A finder re-searches when the city changes to a non-empty value. When the
/// estimator or the finder loses its inputs, its outstanding request is
/// dropped and the placeholder shown.
fn on_specs_changed(state: &ServerAppState, previous: &HouseSpecs, current: &HouseSpecs) {
    match state.shell.active() {
        AppTab::Design => design_routes::emit_view(state, current),
        AppTab::Estimate => {
            if !current.is_ready() {
                state.estimate.unmount();
            }
            estimate_routes::emit_view(state, current);
        }
        AppTab::FindPros => {
            if previous.city == current.city {
                return;
            }
            if current.city.is_empty() {
                state.pros.unmount();
            } else if let Some((ticket, category)) =
                state.pros.city_changed(&previous.city, &current.city)
            {
                pros_routes::spawn_search(state, ticket, current.city.clone(), category);
            }
            pros_routes::emit_view(state, &current.city);
        }
        AppTab::Home => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_specs_command() {
        assert!(is_specs_command("get_specs"));
        assert!(is_specs_command("update_spec_field"));
        assert!(!is_specs_command("navigate"));
    }

    #[test]
    fn test_field_value_accepts_numbers() {
        let args = serde_json::json!({"field": "floors", "value": 3});
        assert_eq!(field_value(&args).unwrap(), "3");

        let args = serde_json::json!({"field": "city", "value": "Multan"});
        assert_eq!(field_value(&args).unwrap(), "Multan");

        assert!(field_value(&serde_json::json!({"value": true})).is_err());
        assert!(field_value(&serde_json::json!({})).is_err());
    }
}
