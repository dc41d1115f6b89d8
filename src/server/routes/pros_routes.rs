//! Professional finder command routing
//!
//! Handles: get_pros_view, set_pros_category

use crate::events::{emit_serialized, EVENT_PROS_UPDATED};
use crate::models::state_machine::RequestTicket;
use crate::models::ProfessionalCategory;
use serde_json::Value;

use super::{get_arg, route_value, ServerAppState};

/// Check if a command is a finder command
pub fn is_pros_command(cmd: &str) -> bool {
    matches!(cmd, "get_pros_view" | "set_pros_category")
}

/// Route finder commands
pub async fn route_pros_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    let city = state.specs.get()?.city;
    match cmd {
        "get_pros_view" => route_value!(state.pros.view(&city)),

        "set_pros_category" => {
            let category: ProfessionalCategory = get_arg(&args, "category")?;
            if let Some((ticket, category)) = state.pros.set_category(category, &city) {
                spawn_search(state, ticket, city.clone(), category);
            }
            emit_view(state, &city);
            route_value!(state.pros.view(&city))
        }

        _ => Err(format!("Unknown pros command: {}", cmd)),
    }
}

/// Run an issued search in the background. An applied reply is emitted
/// against the live specs.
pub fn spawn_search(
    state: &ServerAppState,
    ticket: RequestTicket,
    city: String,
    category: ProfessionalCategory,
) {
    let state = state.clone();
    tokio::spawn(async move {
        if !state.pros.run(&state.generation, ticket, &city, category).await {
            return;
        }
        // The heading follows the live city, not the one searched
        match state.specs.get() {
            Ok(live) => emit_view(&state, &live.city),
            Err(e) => log::error!("Failed to read specs after search: {}", e),
        }
    });
}

pub fn emit_view(state: &ServerAppState, city: &str) {
    emit_serialized(
        state.generation.emitter.as_ref(),
        EVENT_PROS_UPDATED,
        state.pros.view(city),
    );
}
