//! Server application state shared across handlers

use super::events::{BroadcastEmitter, EventBroadcaster};
use crate::commands::{
    DesignState, EstimateState, GenerationContext, ProsState, ShellState, SpecsState,
};
use crate::shutdown::ShutdownState;
use std::sync::Arc;

/// Shared state for the server: the specification store, the shell, the
/// three view controllers and the Gemini wiring.
#[derive(Clone)]
pub struct ServerAppState {
    /// Shutdown state
    pub shutdown_state: ShutdownState,

    /// Event broadcaster for WebSocket clients
    pub broadcaster: Arc<EventBroadcaster>,

    /// The one live house specification
    pub specs: Arc<SpecsState>,

    /// Active tab
    pub shell: Arc<ShellState>,

    pub design: Arc<DesignState>,
    pub estimate: Arc<EstimateState>,
    pub pros: Arc<ProsState>,

    /// Backend, models and emitter used by controller requests
    pub generation: GenerationContext,
}

impl ServerAppState {
    /// Create the server state. The generation context's emitter is replaced
    /// with one that feeds the WebSocket broadcaster.
    pub fn new(shutdown_state: ShutdownState, generation: GenerationContext) -> Self {
        let broadcaster = Arc::new(EventBroadcaster::new());
        let generation =
            generation.with_emitter(Arc::new(BroadcastEmitter::new(broadcaster.clone())));

        Self {
            shutdown_state,
            broadcaster,
            specs: Arc::new(SpecsState::default()),
            shell: Arc::new(ShellState::new()),
            design: Arc::new(DesignState::new()),
            estimate: Arc::new(EstimateState::new()),
            pros: Arc::new(ProsState::new()),
            generation,
        }
    }
}
