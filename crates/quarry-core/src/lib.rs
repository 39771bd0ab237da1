//! Core types and pure logic for Quarry.
//!
//! Everything here is engine-free and synchronous: the shared data types,
//! identifier sanitization, prompt rendering, generated-text normalization,
//! the keyword deny-list, the candidate-query lifecycle, and query hashing.
//! The stages that need a live DuckDB connection (plan dry run, execution)
//! live in `quarry-duckdb`; the text-generation boundary lives in
//! `quarry-llm`.

pub mod extract;
pub mod hashing;
pub mod identifier;
pub mod prompt;
pub mod query;
pub mod safety;
pub mod types;

pub use extract::extract_sql;
pub use hashing::query_hash;
pub use identifier::{sanitize_table_identifier, table_identifier_for_path};
pub use prompt::build_prompt;
pub use query::{CandidateQuery, QueryState};
pub use safety::{find_denied_keyword, is_blank_statement, static_reject, DENY_KEYWORDS};
pub use types::{
    CellValue, ColumnMeta, ExecutionOutcome, LoadReport, LoadedTable, RejectReason, TableInfo,
    TabularResult, ValidationOutcome,
};
