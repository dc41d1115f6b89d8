// Clippy allows for reasonable defaults
#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types
#![allow(clippy::derivable_impls)] // Explicit Default impls can be clearer
#![allow(clippy::field_reassign_with_default)] // Builder pattern is clearer

// Module declarations
pub mod commands;
pub mod config;
pub mod events;
pub mod gemini;
pub mod models;
pub mod parsers;
pub mod shutdown;
mod templates;
mod utils;

// Server module (HTTP/WebSocket API)
pub mod server;

pub use models::*;

use commands::GenerationContext;
use config::AppConfig;
use gemini::{GeminiClient, GeminiError};
use std::sync::Arc;

/// Wire a real Gemini client into a generation context using `config`
pub fn gemini_context(config: &AppConfig, api_key: &str) -> Result<GenerationContext, GeminiError> {
    let client = GeminiClient::new(&config.gemini.api_base, api_key)?;

    let mut ctx = GenerationContext::new(Arc::new(client));
    ctx.image_model = config.gemini.image_model.clone();
    ctx.text_model = config.gemini.text_model.clone();
    ctx.grounding = config.grounding.lat_lng();
    Ok(ctx)
}
