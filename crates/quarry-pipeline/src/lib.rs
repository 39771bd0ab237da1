//! Question-to-result pipeline for Quarry.
//!
//! Wires the pieces together: the table store from `quarry-duckdb`, a text
//! provider from `quarry-llm`, prompt/extraction/validation rules from
//! `quarry-core`. Adds the two pieces that belong to the application layer:
//! an in-process answer cache and the feedback log.

pub mod error;
pub mod feedback;
pub mod pipeline;
pub mod sql_cache;

pub use error::{PipelineError, PipelineResult};
pub use feedback::{FeedbackEntry, FeedbackKind, FeedbackLog, FeedbackStats};
pub use pipeline::QueryPipeline;
pub use sql_cache::SqlCache;
