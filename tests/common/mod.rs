// Scripted stand-ins for the Gemini backend

#![allow(dead_code)]

use async_trait::async_trait;
use dreambuild_lib::gemini::{GeminiError, GenerateContentRequest, GenerateContentResponse, GenerativeBackend};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// One recorded call: model plus the serialized request body
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub body: Value,
}

impl RecordedCall {
    pub fn prompt(&self) -> &str {
        self.body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
    }
}

/// Answers calls in order from a queue of canned replies
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            body: serde_json::to_value(request).unwrap(),
        });

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => Ok(serde_json::from_value(body).unwrap()),
            Some(Err(message)) => Err(GeminiError::Api {
                status: 500,
                body: message,
            }),
            None => Err(GeminiError::Api {
                status: 503,
                body: "no scripted reply left".to_string(),
            }),
        }
    }
}

/// Holds each call until the test releases the reply for its prompt
pub struct GatedBackend {
    gates: Mutex<Vec<(String, oneshot::Receiver<Value>)>>,
}

impl GatedBackend {
    /// Gate every call whose prompt contains one of `phrases`
    pub fn new(phrases: &[&str]) -> (Self, Vec<oneshot::Sender<Value>>) {
        let mut gates = Vec::new();
        let mut senders = Vec::new();
        for phrase in phrases {
            let (tx, rx) = oneshot::channel();
            gates.push((phrase.to_string(), rx));
            senders.push(tx);
        }
        (
            Self {
                gates: Mutex::new(gates),
            },
            senders,
        )
    }
}

#[async_trait]
impl GenerativeBackend for GatedBackend {
    async fn generate_content(
        &self,
        _model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let prompt = request.prompt_text().unwrap_or_default().to_string();
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let index = gates
                .iter()
                .position(|(phrase, _)| prompt.contains(phrase.as_str()))
                .expect("no gate for prompt");
            gates.remove(index).1
        };

        let body = gate
            .await
            .map_err(|_| GeminiError::Decode("gate dropped".to_string()))?;
        Ok(serde_json::from_value(body).unwrap())
    }
}

pub fn text_reply(text: &str) -> Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

pub fn image_reply(base64: &str) -> Value {
    json!({"candidates": [{"content": {"parts": [
        {"text": "Here is your house."},
        {"inlineData": {"mimeType": "image/png", "data": base64}}
    ]}}]})
}

pub fn grounded_reply(text: &str, chunks: Value) -> Value {
    json!({"candidates": [{
        "content": {"parts": [{"text": text}]},
        "groundingMetadata": {"groundingChunks": chunks}
    }]})
}

pub const ESTIMATE_JSON: &str = r#"{
    "currency": "PKR",
    "totalEstimatedCost": 45000000,
    "breakdown": [
        {"category": "Grey Structure", "amount": 18000000, "description": "Cement, steel, bricks"},
        {"category": "Finishing", "amount": 20000000, "description": "Tiles, paint, woodwork"},
        {"category": "Labor", "amount": 7000000, "description": "Masons and helpers"}
    ],
    "summary": "Premium double story build."
}"#;
