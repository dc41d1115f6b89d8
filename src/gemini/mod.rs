//! Gemini `generateContent` integration
//!
//! The service is the only network dependency of the application. Everything
//! that talks to it goes through [`GenerativeBackend`], so controllers and
//! tests can swap the real HTTP client for a scripted one.

pub mod client;
pub mod requests;
pub mod types;

pub use client::GeminiClient;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GoogleMaps, GroundingMetadata, InlineData, LatLng, Part, RetrievalConfig, Schema,
    SchemaType, Tool, ToolConfig,
};

use crate::parsers::structured_output::StructuredOutputError;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of any of the three service calls
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("No Gemini API key configured (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("Request to Gemini failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(String),

    #[error("Gemini response contained no text")]
    EmptyResponse,

    #[error("Gemini response contained no image data")]
    NoImage,

    #[error("Structured response rejected: {0}")]
    Schema(#[from] StructuredOutputError),

    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

/// Anything that can answer a `generateContent` call
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}
