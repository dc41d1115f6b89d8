//! Design studio command routing
//!
//! Handles: get_design_view, set_view_mode, visualize

use crate::events::{emit_serialized, EVENT_DESIGN_UPDATED};
use crate::models::state_machine::RequestTicket;
use crate::models::{HouseSpecs, ViewMode};
use serde_json::Value;

use super::{get_arg, route_value, ServerAppState};

/// Check if a command is a design command
pub fn is_design_command(cmd: &str) -> bool {
    matches!(cmd, "get_design_view" | "set_view_mode" | "visualize")
}

/// Route design commands
pub async fn route_design_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    let specs = state.specs.get()?;
    match cmd {
        "get_design_view" => route_value!(state.design.view(&specs)),

        "set_view_mode" => {
            let view_mode: ViewMode = get_arg(&args, "viewMode")?;
            state.design.set_view_mode(view_mode);
            emit_view(state, &specs);
            route_value!(state.design.view(&specs))
        }

        "visualize" => {
            if let Some((ticket, view_mode)) = state.design.begin(&specs) {
                spawn_visualization(state, ticket, specs.clone(), view_mode);
                emit_view(state, &specs);
            }
            route_value!(state.design.view(&specs))
        }

        _ => Err(format!("Unknown design command: {}", cmd)),
    }
}

/// Run an issued visualization in the background
pub fn spawn_visualization(
    state: &ServerAppState,
    ticket: RequestTicket,
    specs: HouseSpecs,
    view_mode: ViewMode,
) {
    let state = state.clone();
    tokio::spawn(async move {
        if !state.design.run(&state.generation, ticket, &specs, view_mode).await {
            return;
        }
        match state.specs.get() {
            Ok(live) => emit_view(&state, &live),
            Err(e) => log::error!("Failed to read specs after visualization: {}", e),
        }
    });
}

pub fn emit_view(state: &ServerAppState, specs: &HouseSpecs) {
    emit_serialized(
        state.generation.emitter.as_ref(),
        EVENT_DESIGN_UPDATED,
        state.design.view(specs),
    );
}
