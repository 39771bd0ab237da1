//! DuckDB-backed table store for Quarry.
//!
//! This crate owns everything that touches the embedded engine: opening the
//! store with lock-contention retries (`connect`), the guarded connection
//! handle (`store`), bulk-loading data files into tables (`loader`), schema
//! introspection (`catalog`), statement validation (`validator`), and query
//! execution (`executor`).
//!
//! Everything above this crate works with the plain data types from
//! `quarry-core`; no DuckDB types leak out of this boundary.

pub mod catalog;
pub mod connect;
pub mod error;
pub mod executor;
pub mod loader;
pub mod store;
pub mod validator;

pub use catalog::SchemaCatalog;
pub use connect::{fallback_store_path, is_lock_contention, AttemptOutcome, OpenState, OpenTarget, RetryPolicy};
pub use error::{StoreError, StoreResult};
pub use executor::QueryExecutor;
pub use loader::TableLoader;
pub use store::TableStore;
pub use validator::SqlValidator;
