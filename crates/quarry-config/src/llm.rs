//! Text generation provider configuration.

use serde::{Deserialize, Serialize};

/// Supported text generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Ollama local models.
    #[default]
    Ollama,
    /// OpenAI-compatible chat completion endpoints.
    OpenAI,
    /// Canned responses for tests and offline runs.
    Mock,
}

impl ProviderKind {
    /// Default endpoint for the provider.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "http://localhost:11434",
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::Mock => "mock",
        }
    }

    /// Default model for the provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "llama3.2",
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Mock => "mock-model",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderKind::OpenAI)
    }
}

/// Sampling parameters for SQL generation. The defaults are deliberately
/// conservative: short answers, low temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

/// Configuration for the text generation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider type.
    pub provider: ProviderKind,

    /// Endpoint base URL; falls back to the provider default.
    pub endpoint: Option<String>,

    /// Model name; falls back to the provider default.
    pub model: Option<String>,

    /// Environment variable holding the API key, for providers that need one.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Generation parameters.
    pub generation: GenerationConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: None,
            model: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
            generation: GenerationConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Effective endpoint: explicit value or the provider default.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.provider.default_endpoint().to_string())
    }

    /// Effective model: explicit value or the provider default.
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let config = LlmConfig::default();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.endpoint(), "http://localhost:11434");
        assert_eq!(config.model(), "llama3.2");
        assert_eq!(config.generation.max_tokens, 500);
        assert!((config.generation.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn explicit_values_win_over_provider_defaults() {
        let config = LlmConfig {
            provider: ProviderKind::OpenAI,
            endpoint: Some("http://proxy:8080/v1".to_string()),
            model: Some("gpt-4o".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(config.endpoint(), "http://proxy:8080/v1");
        assert_eq!(config.model(), "gpt-4o");
    }

    #[test]
    fn provider_kinds_deserialize_lowercase() {
        let config: LlmConfig = toml::from_str("provider = \"openai\"").unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert!(config.provider.requires_api_key());

        let config: LlmConfig = toml::from_str("provider = \"mock\"").unwrap();
        assert_eq!(config.provider, ProviderKind::Mock);
        assert!(!config.provider.requires_api_key());
    }
}
