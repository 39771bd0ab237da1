//! Query execution and result materialization.
//!
//! [`QueryExecutor::execute`] re-runs validation before touching the engine
//! even when the caller already validated, so no unvetted statement can
//! reach execution through this path. Results are materialized eagerly into
//! [`TabularResult`] with engine values mapped onto the small [`CellValue`]
//! vocabulary; temporal values are rendered as text.
//!
//! [`QueryExecutor::sample`] is the one deliberate exception: it builds a
//! bounded `SELECT * ... LIMIT` over a sanitized identifier itself, so the
//! statement never came from a model and skips validation.

use duckdb::types::{TimeUnit, ValueRef};
use tracing::{error, info, warn};

use quarry_core::identifier::sanitize_table_identifier;
use quarry_core::types::{CellValue, ColumnMeta, ExecutionOutcome, TabularResult, ValidationOutcome};

use crate::error::{StoreError, StoreResult};
use crate::store::TableStore;
use crate::validator::SqlValidator;

pub struct QueryExecutor<'a> {
    store: &'a TableStore,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(store: &'a TableStore) -> Self {
        Self { store }
    }

    /// Validate `sql`, execute it, and materialize the full result set.
    pub fn execute(&self, sql: &str) -> ExecutionOutcome {
        match SqlValidator::new(self.store).validate(sql) {
            ValidationOutcome::Valid => {}
            ValidationOutcome::Invalid(reason) => {
                return ExecutionOutcome::Failure(format!("Invalid SQL query: {reason}"));
            }
        }
        match self.run(sql) {
            Ok(result) => {
                info!("SQL executed successfully, returned {} rows", result.row_count());
                ExecutionOutcome::Success(result)
            }
            Err(err) => {
                let message = format!("SQL execution failed: {}", error_detail(err));
                error!("{message}");
                ExecutionOutcome::Failure(message)
            }
        }
    }

    /// First `limit` rows of `table`, for previewing loaded data.
    pub fn sample(&self, table: &str, limit: usize) -> ExecutionOutcome {
        let table = sanitize_table_identifier(table);
        let sql = format!("SELECT * FROM {table} LIMIT {limit}");
        match self.run(&sql) {
            Ok(result) => ExecutionOutcome::Success(result),
            Err(err) => {
                let message = format!("Failed to get sample from {table}: {}", error_detail(err));
                warn!("{message}");
                ExecutionOutcome::Failure(message)
            }
        }
    }

    fn run(&self, sql: &str) -> StoreResult<TabularResult> {
        self.store.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let mut rows = stmt.query([])?;

            let mut data: Vec<Vec<CellValue>> = Vec::new();
            while let Some(row) = rows.next()? {
                let mut cells = Vec::new();
                // Probe columns until the row runs out; Rows holds a borrow
                // on stmt, so names are collected afterwards.
                for idx in 0.. {
                    match row.get_ref(idx) {
                        Ok(value) => cells.push(cell_from_value(value)),
                        Err(_) => break,
                    }
                }
                data.push(cells);
            }
            drop(rows);

            let columns = stmt
                .column_names()
                .into_iter()
                .enumerate()
                .map(|(idx, name)| ColumnMeta::new(name, infer_type_label(&data, idx)))
                .collect();

            Ok(TabularResult { columns, rows: data })
        })
    }
}

fn error_detail(err: StoreError) -> String {
    match err {
        StoreError::Duckdb(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

/// Map one engine value onto the result vocabulary.
fn cell_from_value(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Boolean(b) => CellValue::Boolean(b),
        ValueRef::TinyInt(i) => CellValue::Integer(i64::from(i)),
        ValueRef::SmallInt(i) => CellValue::Integer(i64::from(i)),
        ValueRef::Int(i) => CellValue::Integer(i64::from(i)),
        ValueRef::BigInt(i) => CellValue::Integer(i),
        ValueRef::HugeInt(i) => match i64::try_from(i) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Text(i.to_string()),
        },
        ValueRef::UTinyInt(i) => CellValue::Integer(i64::from(i)),
        ValueRef::USmallInt(i) => CellValue::Integer(i64::from(i)),
        ValueRef::UInt(i) => CellValue::Integer(i64::from(i)),
        ValueRef::UBigInt(i) => match i64::try_from(i) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Text(i.to_string()),
        },
        ValueRef::Float(f) => CellValue::Float(f64::from(f)),
        ValueRef::Double(f) => CellValue::Float(f),
        ValueRef::Decimal(d) => {
            let text = d.to_string();
            match text.parse::<f64>() {
                Ok(f) => CellValue::Float(f),
                Err(_) => CellValue::Text(text),
            }
        }
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Binary(bytes.to_vec()),
        ValueRef::Timestamp(unit, raw) => render_timestamp(unit, raw),
        ValueRef::Date32(days) => render_date(days),
        ValueRef::Time64(unit, raw) => render_time(unit, raw),
        other => CellValue::Text(format!("{other:?}")),
    }
}

fn to_micros(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000),
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    }
}

fn render_timestamp(unit: TimeUnit, raw: i64) -> CellValue {
    match chrono::DateTime::from_timestamp_micros(to_micros(unit, raw)) {
        Some(dt) => CellValue::Text(dt.naive_utc().format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
        None => CellValue::Null,
    }
}

fn render_date(days: i32) -> CellValue {
    match chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0) {
        Some(dt) => CellValue::Text(dt.date_naive().format("%Y-%m-%d").to_string()),
        None => CellValue::Null,
    }
}

fn render_time(unit: TimeUnit, raw: i64) -> CellValue {
    let micros = to_micros(unit, raw);
    let secs = (micros / 1_000_000) as u32;
    let nanos = ((micros % 1_000_000) as u32).saturating_mul(1_000);
    match chrono::NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos) {
        Some(t) => CellValue::Text(t.format("%H:%M:%S%.6f").to_string()),
        None => CellValue::Null,
    }
}

/// Column type label derived from the first non-null cell in the column.
fn infer_type_label(rows: &[Vec<CellValue>], idx: usize) -> &'static str {
    for row in rows {
        match row.get(idx) {
            Some(CellValue::Boolean(_)) => return "BOOLEAN",
            Some(CellValue::Integer(_)) => return "BIGINT",
            Some(CellValue::Float(_)) => return "DOUBLE",
            Some(CellValue::Text(_)) => return "VARCHAR",
            Some(CellValue::Binary(_)) => return "BLOB",
            Some(CellValue::Null) | None => continue,
        }
    }
    "NULL"
}
