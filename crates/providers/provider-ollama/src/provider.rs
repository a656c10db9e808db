//! Ollama provider implementation.

use async_trait::async_trait;

use agentrun_protocols::error::ProviderError;
use agentrun_protocols::provider::{ChunkStream, GenerationRequest, TextProvider};

use crate::api::{ApiMessage, ApiOptions, ApiRequest};
use crate::parser::chunk_stream;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Streaming adapter for a local Ollama server.
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider against the default local endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider with a custom default endpoint. A per-agent
    /// `base_url` on the request still takes precedence.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::ClientBuilder::new()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    fn endpoint(&self, request: &GenerationRequest) -> String {
        let base = request.base_url.as_deref().unwrap_or(&self.base_url);
        format!("{}/api/chat", base.trim_end_matches('/'))
    }

    fn build_request(&self, request: &GenerationRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            stream: true,
            options: Some(ApiOptions {
                temperature: request.temperature,
            }),
        }
    }

    async fn send_request(
        &self,
        url: &str,
        api_request: &ApiRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            // Ollama error bodies look like {"error": "..."}
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"].as_str().map(String::from))
                .unwrap_or(body);
            return Err(ProviderError::from_api_response(status, message));
        }

        Ok(response)
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    async fn stream_generate(
        &self,
        request: GenerationRequest,
    ) -> Result<ChunkStream, ProviderError> {
        let api_request = self.build_request(&request);
        let url = self.endpoint(&request);
        tracing::debug!(model = %request.model, %url, "Opening Ollama stream");

        let response = self.send_request(&url, &api_request).await?;
        Ok(Box::pin(chunk_stream(Box::pin(response.bytes_stream()))))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
