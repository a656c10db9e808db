//! Text provider trait definition.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use super::{GenerationRequest, TextChunk};
use crate::error::ProviderError;

/// Core trait for streaming text providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the provider tag agents reference, e.g. "ollama".
    fn id(&self) -> &str;

    /// Open a streamed generation.
    ///
    /// The returned stream is lazy, finite, and non-restartable; it ends
    /// when the model finishes generating or yields an error on provider
    /// failure.
    async fn stream_generate(
        &self,
        request: GenerationRequest,
    ) -> Result<ChunkStream, ProviderError>;
}

/// Stream of text chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<TextChunk, ProviderError>> + Send>>;
