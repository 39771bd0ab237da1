//! Wire-level tests for the HTTP providers, run against a local mock server.

use quarry_llm::{GenerationRequest, LlmError, OllamaProvider, OpenAIProvider, TextProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request_with_params(prompt: &str) -> GenerationRequest {
    GenerationRequest {
        max_tokens: Some(500),
        temperature: Some(0.0),
        ..GenerationRequest::from_prompt(prompt)
    }
}

#[tokio::test]
async fn ollama_sends_chat_body_and_parses_the_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "stream": false,
            "options": { "temperature": 0.0, "num_predict": 500 },
            "messages": [{ "role": "user", "content": "how many sales" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "message": { "role": "assistant", "content": "SELECT COUNT(*) FROM sales" },
            "done": true,
            "prompt_eval_count": 42,
            "eval_count": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.2".to_string(), 10);
    let response = provider
        .generate(request_with_params("how many sales"))
        .await
        .unwrap();

    assert_eq!(response.text, "SELECT COUNT(*) FROM sales");
    assert_eq!(response.model, "llama3.2");
    assert_eq!(response.prompt_tokens, Some(42));
    assert_eq!(response.completion_tokens, Some(9));
}

#[tokio::test]
async fn ollama_error_status_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not found"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.2".to_string(), 10);
    let err = provider
        .generate(GenerationRequest::from_prompt("hi"))
        .await
        .unwrap_err();

    match err {
        LlmError::InvalidResponse(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("model not found"));
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn ollama_garbage_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.2".to_string(), 10);
    let err = provider
        .generate(GenerationRequest::from_prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_an_http_error() {
    // Nothing listens on port 9; connection is refused immediately.
    let provider = OllamaProvider::new("http://127.0.0.1:9".to_string(), "llama3.2".to_string(), 2);
    let err = provider
        .generate(GenerationRequest::from_prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::HttpError(_)));
}

#[tokio::test]
async fn ollama_health_check_probes_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.2".to_string(), 10);
    assert!(provider.health_check().await.unwrap());

    let dead = OllamaProvider::new("http://127.0.0.1:9".to_string(), "llama3.2".to_string(), 2);
    assert!(!dead.health_check().await.unwrap());
}

#[tokio::test]
async fn openai_sends_bearer_auth_and_parses_the_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 500,
            "messages": [{ "role": "user", "content": "top regions" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "```sql\nSELECT region FROM sales\n```" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAIProvider::new(
        "test-key".to_string(),
        Some(server.uri()),
        "gpt-4o-mini".to_string(),
        10,
    );
    let response = provider
        .generate(request_with_params("top regions"))
        .await
        .unwrap();

    assert_eq!(response.text, "```sql\nSELECT region FROM sales\n```");
    assert_eq!(response.prompt_tokens, Some(30));
    assert_eq!(response.completion_tokens, Some(12));
}

#[tokio::test]
async fn openai_without_choices_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": []
        })))
        .mount(&server)
        .await;

    let provider = OpenAIProvider::new(
        "test-key".to_string(),
        Some(server.uri()),
        "gpt-4o-mini".to_string(),
        10,
    );
    let err = provider
        .generate(GenerationRequest::from_prompt("hi"))
        .await
        .unwrap_err();

    match err {
        LlmError::InvalidResponse(message) => assert!(message.contains("No choices")),
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}
