//! OpenAI provider adapter.
//!
//! Streams chat completions from the OpenAI API (or any OpenAI-compatible
//! endpoint) over server-sent events, surfacing the token usage reported in
//! the final stream chunk.

mod api;
mod parser;
mod provider;

pub use provider::OpenAIProvider;
