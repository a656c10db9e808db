use super::*;
use futures::StreamExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

#[test]
fn test_provider_id() {
    let provider = OpenAIProvider::new("test-key".to_string());
    assert_eq!(provider.id(), "openai");
}

#[test]
fn test_default_api_url() {
    let provider = OpenAIProvider::new("key".to_string());
    assert_eq!(provider.api_url, DEFAULT_API_URL);
}

#[test]
fn test_custom_url() {
    let provider =
        OpenAIProvider::with_url("key".to_string(), "https://custom.api/v1".to_string());
    assert_eq!(provider.api_url, "https://custom.api/v1");
}

#[test]
fn test_build_request_asks_for_usage() {
    let provider = OpenAIProvider::new("key".to_string());
    let request = GenerationRequest::new("gpt-4o", "Hello").with_temperature(0.7);
    let api_request = provider.build_request(&request);
    assert_eq!(api_request.model, "gpt-4o");
    assert!(api_request.stream);
    assert!(api_request.stream_options.as_ref().unwrap().include_usage);
    assert_eq!(api_request.temperature, Some(0.7));
    assert_eq!(api_request.messages[0].content, "Hello");
}

mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_stream_success_with_usage() {
        let mock_server = MockServer::start().await;

        let body = concat!(
            "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"he\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"llo\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: {\"id\":\"c1\",\"choices\":[],\"usage\":{\"prompt_tokens\":10,\"completion_tokens\":5,\"total_tokens\":15}}\n\n",
            "data: [DONE]\n\n",
        );

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .and(matchers::header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let mut stream = provider
            .stream_generate(GenerationRequest::new("gpt-4o", "hi"))
            .await
            .unwrap();

        let mut answer = String::new();
        let mut usage = None;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            answer.push_str(&chunk.text);
            if chunk.usage.is_some() {
                usage = chunk.usage;
            }
        }

        assert_eq!(answer, "hello");
        let usage = usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 5);
    }

    #[tokio::test]
    async fn test_invalid_api_key() {
        let mock_server = MockServer::start().await;

        let error_body =
            r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("bad-key".to_string(), mock_server.uri());
        let result = provider
            .stream_generate(GenerationRequest::new("gpt-4o", "hi"))
            .await;

        match result {
            Err(ProviderError::AuthenticationFailed(message)) => {
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("Expected AuthenticationFailed, got {:?}", other.map(|_| "stream")),
        }
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mock_server = MockServer::start().await;

        let error_body =
            r#"{"error": {"message": "Rate limit exceeded", "type": "rate_limit_error"}}"#;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .respond_with(ResponseTemplate::new(429).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider
            .stream_generate(GenerationRequest::new("gpt-4o", "hi"))
            .await;

        match result {
            Err(ProviderError::RateLimited(message)) => {
                assert!(message.contains("Rate limit exceeded"));
            }
            other => panic!("Expected RateLimited, got {:?}", other.map(|_| "stream")),
        }
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider
            .stream_generate(GenerationRequest::new("gpt-4o", "hi"))
            .await;

        match result {
            Err(ProviderError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected ApiError, got {:?}", other.map(|_| "stream")),
        }
    }
}
