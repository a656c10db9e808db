//! Conversational memory types.

use serde::{Deserialize, Serialize};

/// One retained (input, output) pair in an agent's short-term memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub input: String,
    pub output: String,
}

impl MemoryEntry {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}
