//! Canned provider for tests and offline runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{LlmError, LlmResult};
use crate::provider::{GenerationRequest, GenerationResponse, TextProvider};

/// Answers from a table keyed by the last user message, with a default for
/// everything else. Calls are recorded so tests can assert on the prompt
/// that was actually sent.
#[derive(Clone)]
pub struct MockTextProvider {
    model_name: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: String,
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self {
            model_name: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: "SELECT 1".to_string(),
            failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answer `response`, regardless of the prompt.
    pub fn with_response(response: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.default_response = response.into();
        provider
    }

    /// Answer `response` when the last user message equals `prompt`.
    pub fn set_response(&self, prompt: &str, response: &str) {
        self.responses
            .lock()
            .insert(prompt.to_string(), response.to_string());
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    /// The most recent request, if any call was made.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        self.requests.lock().push(request.clone());

        if let Some(message) = self.failure.lock().clone() {
            return Err(LlmError::HttpError(message));
        }

        let key = request.last_user_message().unwrap_or("").to_string();
        let text = self
            .responses
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        Ok(GenerationResponse {
            text,
            model: self.model_name.clone(),
            prompt_tokens: None,
            completion_tokens: None,
        })
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    fn default_model(&self) -> &str {
        &self.model_name
    }

    async fn health_check(&self) -> LlmResult<bool> {
        Ok(true)
    }
}
