pub mod ask;
pub mod feedback;
pub mod load;
pub mod sample;
pub mod sql;
pub mod tables;

use anyhow::Result;
use std::time::Duration;

use quarry_config::QuarryConfig;
use quarry_duckdb::{RetryPolicy, TableStore};
use quarry_llm::create_provider;
use quarry_pipeline::QueryPipeline;

/// Open the store and provider described by `config`.
///
/// Each command builds its own pipeline and tears it down before exiting;
/// nothing is shared across invocations.
pub fn build_pipeline(config: &QuarryConfig) -> Result<QueryPipeline> {
    let policy = RetryPolicy {
        max_retries: config.store.max_open_retries,
        unit_delay: Duration::from_millis(config.store.retry_unit_ms),
    };
    let store = TableStore::open_with_policy(&config.store.path, &policy)?;
    let provider = create_provider(&config.llm)?;
    Ok(QueryPipeline::new(store, provider, config))
}
