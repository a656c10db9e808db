//! Ollama API wire types.

use serde::{Deserialize, Serialize};

/// Chat request (`POST /api/chat`).
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ApiOptions>,
}

/// Chat message.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Model options forwarded to Ollama.
#[derive(Debug, Serialize)]
pub struct ApiOptions {
    pub temperature: f32,
}

/// One line of the streamed response.
///
/// The final line has `done: true` and carries evaluation counters; a
/// server-side failure mid-stream arrives as a line with only `error`.
#[derive(Debug, Deserialize)]
pub struct StreamLine {
    #[serde(default)]
    pub message: Option<LineMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Message fragment within a stream line.
#[derive(Debug, Deserialize)]
pub struct LineMessage {
    #[serde(default)]
    pub content: String,
}
