//! Cost estimator command routing
//!
//! Handles: get_estimate_view, refresh_estimate

use crate::events::{emit_serialized, EVENT_ESTIMATE_UPDATED};
use crate::models::state_machine::RequestTicket;
use crate::models::HouseSpecs;
use serde_json::Value;

use super::{route_value, ServerAppState};

/// Check if a command is an estimate command
pub fn is_estimate_command(cmd: &str) -> bool {
    matches!(cmd, "get_estimate_view" | "refresh_estimate")
}

/// Route estimate commands
pub async fn route_estimate_command(
    cmd: &str,
    _args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    let specs = state.specs.get()?;
    match cmd {
        "get_estimate_view" => route_value!(state.estimate.view(&specs)),

        "refresh_estimate" => {
            if let Some(ticket) = state.estimate.begin(&specs) {
                spawn_estimate(state, ticket, specs.clone());
                emit_view(state, &specs);
            }
            route_value!(state.estimate.view(&specs))
        }

        _ => Err(format!("Unknown estimate command: {}", cmd)),
    }
}

/// Run an issued estimate request in the background and emit the settled view
pub fn spawn_estimate(state: &ServerAppState, ticket: RequestTicket, specs: HouseSpecs) {
    let state = state.clone();
    tokio::spawn(async move {
        if !state.estimate.run(&state.generation, ticket, &specs).await {
            return;
        }
        match state.specs.get() {
            Ok(live) => emit_view(&state, &live),
            Err(e) => log::error!("Failed to read specs after estimate: {}", e),
        }
    });
}

pub fn emit_view(state: &ServerAppState, specs: &HouseSpecs) {
    emit_serialized(
        state.generation.emitter.as_ref(),
        EVENT_ESTIMATE_UPDATED,
        state.estimate.view(specs),
    );
}
