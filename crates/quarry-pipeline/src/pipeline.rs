//! The question-to-result pipeline.
//!
//! `ask` walks one question through the whole flow: catalog context, answer
//! cache, prompt, generation, SQL extraction, validation, execution. The
//! outcome of everything after generation lives on the returned
//! [`CandidateQuery`]; only pre-generation failures surface as errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use quarry_config::{GenerationConfig, QuarryConfig};
use quarry_core::extract::extract_sql;
use quarry_core::prompt::build_prompt;
use quarry_core::query::CandidateQuery;
use quarry_core::types::{ExecutionOutcome, LoadReport, TableInfo, ValidationOutcome};
use quarry_duckdb::{QueryExecutor, SchemaCatalog, SqlValidator, TableLoader, TableStore};
use quarry_llm::{GenerationRequest, TextProvider};

use crate::error::{PipelineError, PipelineResult};
use crate::sql_cache::SqlCache;

pub struct QueryPipeline {
    store: TableStore,
    provider: Box<dyn TextProvider>,
    generation: GenerationConfig,
    cache: Option<SqlCache>,
}

impl QueryPipeline {
    pub fn new(store: TableStore, provider: Box<dyn TextProvider>, config: &QuarryConfig) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| SqlCache::new(Duration::from_secs(config.cache.ttl_secs)));
        Self {
            store,
            provider,
            generation: config.llm.generation.clone(),
            cache,
        }
    }

    /// Load data files into store tables.
    pub fn load_files(&self, files: &[PathBuf]) -> LoadReport {
        TableLoader::new(&self.store).load(files)
    }

    /// Current catalog: every table with its columns and row count.
    pub fn tables(&self) -> Vec<TableInfo> {
        SchemaCatalog::new(&self.store).overview()
    }

    /// Answer a natural language question.
    ///
    /// Fails fast with [`PipelineError::EmptyContext`] when the store holds
    /// no tables, and with [`PipelineError::Generation`] when the provider
    /// cannot answer. Everything downstream of generation is recorded on
    /// the candidate instead of failing.
    pub async fn ask(
        &self,
        question: &str,
        focus_table: Option<&str>,
    ) -> PipelineResult<CandidateQuery> {
        let tables = self.tables();
        if tables.is_empty() {
            return Err(PipelineError::EmptyContext);
        }

        let candidate = CandidateQuery::new(question, focus_table.map(str::to_string));

        let sql = match self.cached_sql(question, focus_table) {
            Some(sql) => {
                debug!("answer cache hit, skipping generation");
                sql
            }
            None => {
                let prompt = build_prompt(question, &tables, focus_table);
                let request = GenerationRequest {
                    max_tokens: Some(self.generation.max_tokens),
                    temperature: Some(self.generation.temperature),
                    ..GenerationRequest::from_prompt(prompt)
                };
                let response = self.provider.generate(request).await?;
                debug!(
                    model = %response.model,
                    prompt_tokens = ?response.prompt_tokens,
                    completion_tokens = ?response.completion_tokens,
                    "provider answered"
                );
                let sql = extract_sql(&response.text);
                info!("Generated SQL: {sql}");
                if let Some(cache) = &self.cache {
                    cache.put(question, focus_table, &sql);
                }
                sql
            }
        };

        Ok(self.vet_and_execute(candidate.generated(sql)))
    }

    /// Run caller-supplied SQL through validation and execution, skipping
    /// generation entirely.
    pub fn run_sql(&self, sql: &str) -> CandidateQuery {
        let candidate = CandidateQuery::new("", None).generated(sql);
        self.vet_and_execute(candidate)
    }

    /// Preview the first `limit` rows of a table.
    pub fn sample(&self, table: &str, limit: usize) -> ExecutionOutcome {
        QueryExecutor::new(&self.store).sample(table, limit)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn provider_healthy(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }

    /// Path the store is bound to; useful for surfacing fallback binds.
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn is_fallback_store(&self) -> bool {
        self.store.is_fallback()
    }

    pub fn close(&self) {
        self.store.close();
    }

    fn cached_sql(&self, question: &str, focus_table: Option<&str>) -> Option<String> {
        self.cache.as_ref()?.get(question, focus_table)
    }

    fn vet_and_execute(&self, candidate: CandidateQuery) -> CandidateQuery {
        let sql = candidate.sql.clone().unwrap_or_default();
        let verdict = SqlValidator::new(&self.store).validate(&sql);
        let candidate = candidate.validated(verdict.clone());
        match verdict {
            ValidationOutcome::Valid => {
                candidate.executed(QueryExecutor::new(&self.store).execute(&sql))
            }
            ValidationOutcome::Invalid(reason) => {
                warn!("SQL validation failed: {reason}");
                candidate
            }
        }
    }
}
