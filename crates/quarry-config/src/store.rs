//! Table store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the store lives and how stubbornly to open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the store file. The parent directory is created on open.
    pub path: PathBuf,

    /// Open retries against a locked store file.
    pub max_open_retries: u32,

    /// Backoff unit between open retries, in milliseconds. Retry `n` waits
    /// `n` units.
    pub retry_unit_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("quarry_workspace/workspace.duckdb"),
            max_open_retries: 5,
            retry_unit_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_open_behavior() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("quarry_workspace/workspace.duckdb"));
        assert_eq!(config.max_open_retries, 5);
        assert_eq!(config.retry_unit_ms, 500);
    }
}
