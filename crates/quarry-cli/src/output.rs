//! Rendering for query results, catalog listings, and load reports.
//!
//! Every renderer honors the global `--format` flag. CSV output ends with
//! a record terminator, so [`emit`] picks `print!` or `println!` to keep
//! piped output byte-clean.

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::Table;
use quarry_core::{CandidateQuery, ColumnMeta, ExecutionOutcome, TableInfo, TabularResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON records
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// Print a rendered block without doubling the CSV record terminator.
pub fn emit(rendered: &str, format: OutputFormat) {
    if format == OutputFormat::Csv {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}

pub fn render_result(result: &TabularResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(result.column_names());
            for row in &result.rows {
                table.add_row(row.iter().map(|cell| cell.to_string()));
            }
            Ok(table.to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.to_records())?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(result.column_names())?;
            for row in &result.rows {
                writer.write_record(row.iter().map(|cell| cell.to_string()))?;
            }
            into_csv_string(writer)
        }
    }
}

pub fn render_tables(tables: &[TableInfo], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Table", "Rows", "Columns"]);
            for info in tables {
                table.add_row(vec![
                    info.name.clone(),
                    info.row_count.to_string(),
                    describe_columns(&info.columns),
                ]);
            }
            Ok(table.to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tables)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["table", "rows", "columns"])?;
            for info in tables {
                writer.write_record([
                    info.name.clone(),
                    info.row_count.to_string(),
                    describe_columns(&info.columns),
                ])?;
            }
            into_csv_string(writer)
        }
    }
}

/// Report one candidate query to the terminal.
///
/// JSON mode prints the full candidate record, failed or not, so callers
/// always get the structured outcome; the process still exits nonzero on a
/// rejected or failed statement. The other modes print the result rows on
/// success and surface the rejection or failure reason as the error.
pub fn report_candidate(candidate: &CandidateQuery, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(candidate)?);
        return match candidate_failure(candidate) {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        };
    }

    if format == OutputFormat::Table {
        if let Some(sql) = &candidate.sql {
            println!("{} {}", "SQL:".bold(), sql.cyan());
        }
    }

    if let Some(ExecutionOutcome::Success(result)) = &candidate.execution {
        emit(&render_result(result, format)?, format);
        if format == OutputFormat::Table {
            println!("{}", format!("{} rows", result.row_count()).dimmed());
        }
        return Ok(());
    }

    match candidate_failure(candidate) {
        Some(message) => Err(anyhow!("{message}")),
        None => Ok(()),
    }
}

/// The reported reason when a candidate did not reach a successful result.
pub fn candidate_failure(candidate: &CandidateQuery) -> Option<String> {
    if let Some(ExecutionOutcome::Failure(message)) = &candidate.execution {
        return Some(message.clone());
    }
    candidate
        .validation
        .as_ref()
        .and_then(|outcome| outcome.reject_reason())
        .map(|reason| reason.to_string())
}

fn describe_columns(columns: &[ColumnMeta]) -> String {
    columns
        .iter()
        .map(|column| format!("{} ({})", column.name, column.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn into_csv_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("failed to flush csv output: {err}"))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{CellValue, RejectReason, ValidationOutcome};

    fn sample_result() -> TabularResult {
        TabularResult {
            columns: vec![
                ColumnMeta::new("id", "BIGINT"),
                ColumnMeta::new("name", "VARCHAR"),
            ],
            rows: vec![
                vec![CellValue::Integer(1), CellValue::Text("ore".into())],
                vec![CellValue::Integer(2), CellValue::Null],
            ],
        }
    }

    #[test]
    fn csv_render_includes_header_and_blank_nulls() {
        let rendered = render_result(&sample_result(), OutputFormat::Csv).unwrap();
        assert_eq!(rendered, "id,name\n1,ore\n2,\n");
    }

    #[test]
    fn json_render_is_a_record_list() {
        let rendered = render_result(&sample_result(), OutputFormat::Json).unwrap();
        let records: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(records[0]["id"], 1);
        assert_eq!(records[0]["name"], "ore");
        assert_eq!(records[1]["name"], serde_json::Value::Null);
    }

    #[test]
    fn table_render_shows_every_cell() {
        let rendered = render_result(&sample_result(), OutputFormat::Table).unwrap();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("ore"));
        assert!(rendered.contains('2'));
    }

    #[test]
    fn tables_csv_joins_column_descriptions() {
        let tables = vec![TableInfo {
            name: "sales".into(),
            row_count: 3,
            columns: vec![
                ColumnMeta::new("id", "BIGINT"),
                ColumnMeta::new("amount", "DOUBLE"),
            ],
        }];
        let rendered = render_tables(&tables, OutputFormat::Csv).unwrap();
        assert_eq!(rendered, "table,rows,columns\nsales,3,\"id (BIGINT), amount (DOUBLE)\"\n");
    }

    #[test]
    fn failure_reason_prefers_execution_over_validation() {
        let rejected = CandidateQuery::new("q", None)
            .generated("DROP TABLE sales")
            .validated(ValidationOutcome::Invalid(RejectReason::DangerousKeyword(
                "DROP".into(),
            )));
        assert_eq!(
            candidate_failure(&rejected).as_deref(),
            Some("Dangerous operation detected: DROP"),
        );

        let failed = CandidateQuery::new("q", None)
            .generated("SELECT nope FROM sales")
            .validated(ValidationOutcome::Valid)
            .executed(ExecutionOutcome::Failure("SQL execution failed: boom".into()));
        assert_eq!(
            candidate_failure(&failed).as_deref(),
            Some("SQL execution failed: boom"),
        );

        let succeeded = CandidateQuery::new("q", None)
            .generated("SELECT 1")
            .validated(ValidationOutcome::Valid)
            .executed(ExecutionOutcome::Success(sample_result()));
        assert_eq!(candidate_failure(&succeeded), None);
    }
}
