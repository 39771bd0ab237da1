//! Text generation providers for Quarry.
//!
//! The [`TextProvider`] trait is the seam: the pipeline hands it a prompt
//! and gets raw model text back, with no knowledge of which backend
//! answered. [`create_provider`] picks the backend from configuration.

pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use error::{LlmError, LlmResult};
pub use mock::MockTextProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{ChatMessage, GenerationRequest, GenerationResponse, MessageRole, TextProvider};

use quarry_config::{LlmConfig, ProviderKind};
use tracing::debug;

/// Create a provider from configuration.
pub fn create_provider(config: &LlmConfig) -> LlmResult<Box<dyn TextProvider>> {
    debug!(provider = ?config.provider, model = %config.model(), "creating text provider");
    match config.provider {
        ProviderKind::Ollama => Ok(Box::new(OllamaProvider::new(
            config.endpoint(),
            config.model(),
            config.timeout_secs,
        ))),
        ProviderKind::OpenAI => {
            let api_key = std::env::var(&config.api_key_env)
                .map_err(|_| LlmError::ConfigError(format!("{} not set", config.api_key_env)))?;
            Ok(Box::new(OpenAIProvider::new(
                api_key,
                config.endpoint.clone(),
                config.model(),
                config.timeout_secs,
            )))
        }
        ProviderKind::Mock => Ok(Box::new(MockTextProvider::new())),
    }
}
