//! Statement validation: static screening plus an engine dry run.
//!
//! The static stage ([`quarry_core::safety::static_reject`]) rejects blank
//! statements and anything carrying a denied keyword. Statements that pass
//! are then planned with `EXPLAIN`, which parses and binds against the live
//! catalog without executing, so unknown tables and malformed SQL surface
//! here rather than at execution time.

use tracing::debug;

use quarry_core::safety::static_reject;
use quarry_core::types::{RejectReason, ValidationOutcome};

use crate::error::{StoreError, StoreResult};
use crate::store::TableStore;

pub struct SqlValidator<'a> {
    store: &'a TableStore,
}

impl<'a> SqlValidator<'a> {
    pub fn new(store: &'a TableStore) -> Self {
        Self { store }
    }

    /// Screen `sql` and dry-run it. Never executes the statement.
    pub fn validate(&self, sql: &str) -> ValidationOutcome {
        if let Some(reason) = static_reject(sql) {
            debug!(%reason, "statement rejected before dry run");
            return ValidationOutcome::Invalid(reason);
        }
        match self.dry_run(sql) {
            Ok(()) => ValidationOutcome::Valid,
            Err(err) => {
                let detail = match err {
                    StoreError::Duckdb(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                debug!(error = %detail, "dry run refused statement");
                ValidationOutcome::Invalid(RejectReason::SyntaxError(detail))
            }
        }
    }

    fn dry_run(&self, sql: &str) -> StoreResult<()> {
        self.store.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("EXPLAIN {sql}"))?;
            let mut rows = stmt.query([])?;
            while rows.next()?.is_some() {}
            Ok(())
        })
    }
}
