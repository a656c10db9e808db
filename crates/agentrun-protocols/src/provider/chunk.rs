//! Streaming chunk types.

use serde::{Deserialize, Serialize};

/// One incremental fragment of generated text.
///
/// Concatenating `text` over a full stream in emission order reconstructs
/// the complete answer. Adapters that receive usage metadata attach the
/// snapshot to the chunk it arrived with; consumers keep the latest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text fragment; may be empty (e.g. a usage-only trailer).
    pub text: String,

    /// Provider-reported usage counters, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageSnapshot>,
}

impl TextChunk {
    /// A plain text fragment with no usage metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    /// Attach a usage snapshot.
    pub fn with_usage(mut self, usage: UsageSnapshot) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Token counters as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}
