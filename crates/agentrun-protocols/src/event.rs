//! Streaming run event protocol.
//!
//! Events are serialized one-per-line (NDJSON) on the run endpoint. A run
//! emits zero or more `token` events followed by exactly one terminal event:
//! `end` on success, `error` on failure.

use serde::{Deserialize, Serialize};

use crate::memory::MemoryEntry;

/// An event emitted while running an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// One incremental text fragment, in provider order.
    Token { content: String },

    /// Terminal success event.
    End {
        /// The full accumulated answer; equals the concatenation of all
        /// token contents in emission order.
        answer: String,
        /// Memory retained for the agent after this run, most recent first.
        memory: Vec<MemoryEntry>,
        cost: f64,
        agent_name: String,
        provider: String,
        model: String,
        execution_id: i64,
    },

    /// Terminal failure event. No `end` follows it.
    Error { message: String },
}

impl RunEvent {
    pub fn token(content: impl Into<String>) -> Self {
        Self::Token {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
