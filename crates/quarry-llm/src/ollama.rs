//! Ollama provider, speaking the `/api/chat` endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{LlmError, LlmResult};
use crate::provider::{GenerationRequest, GenerationResponse, MessageRole, TextProvider};

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
    timeout: Duration,
}

impl OllamaProvider {
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            default_model: model,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl TextProvider for OllamaProvider {
    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        let mut api_request = serde_json::json!({
            "model": self.default_model,
            "messages": request.messages.iter().map(|m| {
                serde_json::json!({
                    "role": match m.role {
                        MessageRole::System => "system",
                        MessageRole::User => "user",
                        MessageRole::Assistant => "assistant",
                    },
                    "content": m.content.clone(),
                })
            }).collect::<Vec<_>>(),
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            api_request["options"] = serde_json::json!({
                "temperature": temp,
            });
        }

        if let Some(max_tokens) = request.max_tokens {
            if let Some(options) = api_request.get_mut("options") {
                options["num_predict"] = serde_json::json!(max_tokens);
            } else {
                api_request["options"] = serde_json::json!({
                    "num_predict": max_tokens,
                });
            }
        }

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LlmError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::InvalidResponse(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(GenerationResponse {
            text: ollama_response.message.content,
            model: ollama_response.model,
            prompt_tokens: ollama_response.prompt_eval_count,
            completion_tokens: ollama_response.eval_count,
        })
    }

    fn provider_name(&self) -> &str {
        "Ollama"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn health_check(&self) -> LlmResult<bool> {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

// Ollama API response types
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    message: OllamaMessage,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}
