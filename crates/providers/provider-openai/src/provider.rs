//! OpenAI provider implementation.

use async_trait::async_trait;

use agentrun_protocols::error::ProviderError;
use agentrun_protocols::provider::{ChunkStream, GenerationRequest, TextProvider};

use crate::api::{ApiMessage, ApiRequest, StreamOptions};
use crate::parser::chunk_stream;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Streaming adapter for the OpenAI chat completions API.
pub struct OpenAIProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with a custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            client: reqwest::ClientBuilder::new()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    fn build_request(&self, request: &GenerationRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            temperature: Some(request.temperature),
            stream: true,
            stream_options: Some(StreamOptions {
                include_usage: true,
            }),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            // OpenAI error bodies look like {"error": {"message": "...", ...}}
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(body);
            return Err(ProviderError::from_api_response(status, message));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn stream_generate(
        &self,
        request: GenerationRequest,
    ) -> Result<ChunkStream, ProviderError> {
        let api_request = self.build_request(&request);
        tracing::debug!(model = %request.model, "Opening OpenAI stream");

        let response = self.send_request(&api_request).await?;
        Ok(Box::pin(chunk_stream(Box::pin(response.bytes_stream()))))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
