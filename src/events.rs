// Event types and payload structures for real-time updates
// These are broadcast via WebSocket to connected clients

use crate::models::{AppTab, HouseSpecs};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Event name constants
pub const EVENT_SPECS_CHANGED: &str = "specs:changed";
pub const EVENT_SHELL_NAVIGATED: &str = "shell:navigated";
pub const EVENT_DESIGN_UPDATED: &str = "design:updated";
pub const EVENT_ESTIMATE_UPDATED: &str = "estimate:updated";
pub const EVENT_PROS_UPDATED: &str = "pros:updated";

/// Payload for specification change events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecsChangedPayload {
    pub specs: HouseSpecs,
    /// Form field that changed, when the edit was a single field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Payload for tab navigation events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellNavigatedPayload {
    pub from: AppTab,
    pub to: AppTab,
}

/// Sink for view update events.
///
/// Controllers emit through this after every state change so that connected
/// browsers re-render; the server wires it to the WebSocket broadcaster.
pub trait ViewEventEmitter: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

/// Emitter that drops everything (CLI mode and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEmitter;

impl ViewEventEmitter for NoopEmitter {
    fn emit(&self, event: &str, _payload: Value) {
        log::trace!("Dropping event {} (no listeners)", event);
    }
}

/// Serialize `payload` and emit it, logging rather than failing on error
pub fn emit_serialized(emitter: &dyn ViewEventEmitter, event: &str, payload: impl Serialize) {
    match serde_json::to_value(payload) {
        Ok(value) => emitter.emit(event, value),
        Err(e) => log::warn!("Failed to serialize {} payload: {}", event, e),
    }
}
