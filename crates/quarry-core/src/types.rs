//! Shared data types for the load → catalog → validate → execute flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single column of a table or result set: name plus the engine's declared
/// type string (e.g. `BIGINT`, `DOUBLE`, `VARCHAR`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Catalog metadata for one table in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    #[serde(rename = "table_name")]
    pub name: String,
    pub row_count: usize,
    pub columns: Vec<ColumnMeta>,
}

impl TableInfo {
    /// Placeholder entry used when introspection fails for a table: zero
    /// rows, no columns, so a catalog read never fails as a whole.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            row_count: 0,
            columns: Vec::new(),
        }
    }
}

/// One table successfully created by the loader, with its source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedTable {
    pub table_name: String,
    pub file_path: String,
    pub row_count: usize,
    pub columns: Vec<ColumnMeta>,
}

/// Aggregate outcome of one load batch. Each input file lands in exactly one
/// of the two lists; a failed file never aborts the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded: Vec<LoadedTable>,
    pub errors: Vec<String>,
}

impl LoadReport {
    pub fn success_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// A single cell value materialized from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Binary(Vec<u8>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<&CellValue> for serde_json::Value {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Boolean(b) => serde_json::Value::Bool(*b),
            CellValue::Integer(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON representation
            CellValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Binary(bytes) => serde_json::Value::from(bytes.clone()),
        }
    }
}

/// A fully materialized result set: ordered columns, row-major values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularResult {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TabularResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Convert to a row-oriented record list (one JSON object per row, keyed
    /// by column name) for serialization.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| (col.name.clone(), serde_json::Value::from(cell)))
                    .collect()
            })
            .collect()
    }
}

/// Why the safety validator rejected a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Empty or whitespace-only text; nothing to run.
    Empty,
    /// A deny-listed keyword appeared (as a case-insensitive substring)
    /// anywhere in the statement.
    DangerousKeyword(String),
    /// The engine's planner refused the statement (bad dialect or unknown
    /// identifiers).
    SyntaxError(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "Empty SQL query"),
            RejectReason::DangerousKeyword(keyword) => {
                write!(f, "Dangerous operation detected: {}", keyword)
            }
            RejectReason::SyntaxError(detail) => write!(f, "SQL syntax error: {}", detail),
        }
    }
}

/// Outcome of the three-stage safety validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(RejectReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The rejection reason, if any.
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(reason),
        }
    }
}

/// Outcome of executing one vetted statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Success(TabularResult),
    Failure(String),
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success(_))
    }

    pub fn result(&self) -> Option<&TabularResult> {
        match self {
            ExecutionOutcome::Success(result) => Some(result),
            ExecutionOutcome::Failure(_) => None,
        }
    }
}
