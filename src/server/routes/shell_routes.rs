//! Tab navigation command routing
//!
//! Handles: get_shell, navigate
//!
//! Navigating unmounts the screen being left and mounts the one entered.
//! Mounting the estimator or the finder issues their automatic request.

use crate::events::{emit_serialized, EVENT_SHELL_NAVIGATED};
use crate::models::AppTab;
use serde_json::Value;

use super::{design_routes, estimate_routes, get_arg, pros_routes, route_value, ServerAppState};

/// Check if a command is a shell command
pub fn is_shell_command(cmd: &str) -> bool {
    matches!(cmd, "get_shell" | "navigate")
}

/// Route shell commands
pub async fn route_shell_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "get_shell" => route_value!(state.shell.view()),

        "navigate" => {
            let tab: AppTab = get_arg(&args, "tab")?;
            navigate(state, tab)?;
            route_value!(state.shell.view())
        }

        _ => Err(format!("Unknown shell command: {}", cmd)),
    }
}

/// Switch tabs, remounting controllers when the tab actually changes
pub fn navigate(state: &ServerAppState, tab: AppTab) -> Result<(), String> {
    let transition = state.shell.navigate(tab);
    if transition.from == transition.to {
        return Ok(());
    }

    log::debug!("Navigating {} -> {}", transition.from, transition.to);
    unmount(state, transition.from);
    emit_serialized(
        state.generation.emitter.as_ref(),
        EVENT_SHELL_NAVIGATED,
        transition,
    );
    mount(state, transition.to)
}

fn unmount(state: &ServerAppState, tab: AppTab) {
    match tab {
        AppTab::Home => {}
        AppTab::Design => state.design.unmount(),
        AppTab::Estimate => state.estimate.unmount(),
        AppTab::FindPros => state.pros.unmount(),
    }
}

fn mount(state: &ServerAppState, tab: AppTab) -> Result<(), String> {
    let specs = state.specs.get()?;
    match tab {
        AppTab::Home => {}
        AppTab::Design => {
            state.design.mount();
            design_routes::emit_view(state, &specs);
        }
        AppTab::Estimate => {
            if let Some(ticket) = state.estimate.mount(&specs) {
                estimate_routes::spawn_estimate(state, ticket, specs.clone());
            }
            estimate_routes::emit_view(state, &specs);
        }
        AppTab::FindPros => {
            if let Some((ticket, category)) = state.pros.mount(&specs.city) {
                pros_routes::spawn_search(state, ticket, specs.city.clone(), category);
            }
            pros_routes::emit_view(state, &specs.city);
        }
    }
    Ok(())
}
