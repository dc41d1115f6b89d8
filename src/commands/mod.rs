// Backend command handlers: the specification store, the shell and the three
// view controllers

pub mod design;
pub mod estimate;
pub mod pros;
pub mod shell;
pub mod specs;

pub use design::{DesignImage, DesignState, DesignView};
pub use estimate::{EstimateRow, EstimateState, EstimateView};
pub use pros::{ProsResults, ProsState, ProsView};
pub use shell::{ShellState, ShellView};
pub use specs::SpecsState;

use crate::events::{NoopEmitter, ViewEventEmitter};
use crate::gemini::{GenerativeBackend, LatLng};
use std::sync::Arc;

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Everything a controller needs to issue a request and publish its outcome
#[derive(Clone)]
pub struct GenerationContext {
    pub backend: Arc<dyn GenerativeBackend>,
    /// Model used for the visualization call
    pub image_model: String,
    /// Model used for the estimate and finder calls
    pub text_model: String,
    /// Location hint attached to grounded searches
    pub grounding: LatLng,
    pub emitter: Arc<dyn ViewEventEmitter>,
}

impl GenerationContext {
    /// Default models, the Pakistan centroid, and no event listeners
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            grounding: crate::gemini::requests::PAKISTAN_CENTROID,
            emitter: Arc::new(NoopEmitter),
        }
    }

    pub fn with_emitter(mut self, emitter: Arc<dyn ViewEventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }
}
