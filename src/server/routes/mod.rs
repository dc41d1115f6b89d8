//! Command routing modules
//!
//! This module organizes command routing into focused sub-modules by domain:
//! - specs_routes: get_specs, set_specs, update_spec_field, get_spec_options
//! - shell_routes: get_shell, navigate
//! - design_routes: get_design_view, set_view_mode, visualize
//! - estimate_routes: get_estimate_view, refresh_estimate
//! - pros_routes: get_pros_view, set_pros_category
//!
//! Commands that start a Gemini request spawn it and answer immediately with
//! the loading view; the settled view follows over the WebSocket.

pub mod design_routes;
pub mod estimate_routes;
pub mod pros_routes;
pub mod shell_routes;
pub mod specs_routes;

use serde_json::Value;

use super::ServerAppState;

/// Extract a required argument from JSON args
pub fn get_arg<T: serde::de::DeserializeOwned>(args: &Value, name: &str) -> Result<T, String> {
    serde_json::from_value(
        args.get(name)
            .ok_or_else(|| format!("Missing argument: {}", name))?
            .clone(),
    )
    .map_err(|e| format!("Invalid argument {}: {}", name, e))
}

/// Extract an optional argument from JSON args
pub fn get_opt_arg<T: serde::de::DeserializeOwned>(
    args: &Value,
    name: &str,
) -> Result<Option<T>, String> {
    match args.get(name) {
        Some(v) if !v.is_null() => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| format!("Invalid argument {}: {}", name, e)),
        _ => Ok(None),
    }
}

// =============================================================================
// Command Routing Macros
// =============================================================================

/// Routes a sync command
#[macro_export]
macro_rules! route_sync {
    ($handler:expr) => {{
        let result = $handler?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }};
}

/// Serializes an infallible value as a command result
#[macro_export]
macro_rules! route_value {
    ($value:expr) => {{
        serde_json::to_value($value).map_err(|e| e.to_string())
    }};
}

// Re-export macros for use in route modules
pub use route_sync;
pub use route_value;

// =============================================================================
// Main Command Dispatcher
// =============================================================================

/// Route a command to its implementation by dispatching to the appropriate sub-router
pub async fn route_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    if specs_routes::is_specs_command(cmd) {
        return specs_routes::route_specs_command(cmd, args, state).await;
    }

    if shell_routes::is_shell_command(cmd) {
        return shell_routes::route_shell_command(cmd, args, state).await;
    }

    if design_routes::is_design_command(cmd) {
        return design_routes::route_design_command(cmd, args, state).await;
    }

    if estimate_routes::is_estimate_command(cmd) {
        return estimate_routes::route_estimate_command(cmd, args, state).await;
    }

    if pros_routes::is_pros_command(cmd) {
        return pros_routes::route_pros_command(cmd, args, state).await;
    }

    Err(format!("Unknown command: {}", cmd))
}
