//! Configuration for Quarry.
//!
//! Everything is optional in the TOML file; missing sections and fields take
//! the defaults defined here. Resolution order for the file itself: an
//! explicit path, the `QUARRY_CONFIG` environment variable, then
//! `quarry.toml` in the working directory, then built-in defaults.

pub mod error;
pub mod llm;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use llm::{GenerationConfig, LlmConfig, ProviderKind};
pub use store::StoreConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Answer-cache settings. Cached entries map a question (plus optional focus
/// table) to previously generated SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

/// Feedback log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Append-only JSONL file holding feedback entries.
    pub path: PathBuf,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("quarry_workspace/feedback.jsonl"),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    pub store: StoreConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
    pub feedback: FeedbackConfig,
}

impl QuarryConfig {
    /// Load configuration, resolving the file as documented on the crate.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("QUARRY_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = path {
            return Self::from_file(&path);
        }

        let local = Path::new("quarry.toml");
        if local.exists() {
            Self::from_file(local)
        } else {
            debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse a specific TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn full_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quarry.toml");
        fs::write(
            &path,
            r#"
[store]
path = "/data/ws/main.duckdb"
max_open_retries = 3
retry_unit_ms = 100

[llm]
provider = "openai"
model = "gpt-4o"
timeout_secs = 30

[llm.generation]
max_tokens = 256
temperature = 0.0

[cache]
enabled = false
ttl_secs = 60

[feedback]
path = "/data/ws/feedback.jsonl"
"#,
        )
        .unwrap();

        let config = QuarryConfig::from_file(&path).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/data/ws/main.duckdb"));
        assert_eq!(config.store.max_open_retries, 3);
        assert_eq!(config.llm.provider, ProviderKind::OpenAI);
        assert_eq!(config.llm.model(), "gpt-4o");
        assert_eq!(config.llm.generation.max_tokens, 256);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.feedback.path, PathBuf::from("/data/ws/feedback.jsonl"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quarry.toml");
        fs::write(&path, "[llm]\nprovider = \"mock\"\n").unwrap();

        let config = QuarryConfig::from_file(&path).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Mock);
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.cache.ttl_secs, 86_400);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = QuarryConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quarry.toml");
        fs::write(&path, "[llm\nprovider=").unwrap();
        let err = QuarryConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn defaults_cache_for_a_day() {
        let config = QuarryConfig::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 86_400);
    }
}
