//! Ollama provider adapter.
//!
//! Streams chat completions from a local Ollama server (`/api/chat`,
//! newline-delimited JSON).

mod api;
mod parser;
mod provider;

pub use provider::OllamaProvider;
