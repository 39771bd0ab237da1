//! Bulk-loading data files into store tables.
//!
//! One table per file, named after the sanitized file stem. Each file is
//! loaded independently; a bad file lands in the report's error list and
//! never stops the rest of the batch. Re-loading a file replaces its table.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use quarry_core::identifier::table_identifier_for_path;
use quarry_core::types::{LoadReport, LoadedTable};

use crate::catalog::SchemaCatalog;
use crate::error::StoreResult;
use crate::store::TableStore;

pub struct TableLoader<'a> {
    store: &'a TableStore,
}

impl<'a> TableLoader<'a> {
    pub fn new(store: &'a TableStore) -> Self {
        Self { store }
    }

    /// Load every file in `files`, folding per-file results into a report.
    pub fn load(&self, files: &[PathBuf]) -> LoadReport {
        let mut report = LoadReport::default();
        for file in files {
            match self.load_file(file) {
                Ok(table) => {
                    info!("Loaded table '{}' with {} rows", table.table_name, table.row_count);
                    report.loaded.push(table);
                }
                Err(err) => {
                    let message = format!("Failed to load {}: {}", file.display(), err);
                    error!("{message}");
                    report.errors.push(message);
                }
            }
        }
        info!(
            loaded = report.success_count(),
            errors = report.error_count(),
            "load batch finished"
        );
        report
    }

    fn load_file(&self, file: &Path) -> StoreResult<LoadedTable> {
        let table_name = table_identifier_for_path(file);
        let reader = reader_function_for(file);
        // Reader functions reject bound parameters, so the path is spliced
        // as a string literal with embedded quotes doubled.
        let path_literal = file.to_string_lossy().replace('\'', "''");

        self.store.with_connection(|conn| {
            conn.execute_batch(&format!(
                "CREATE OR REPLACE TABLE {table_name} AS SELECT * FROM {reader}('{path_literal}')"
            ))?;
            Ok(())
        })?;

        let info = SchemaCatalog::new(self.store).describe(&table_name);
        Ok(LoadedTable {
            table_name: info.name,
            file_path: file.display().to_string(),
            row_count: info.row_count,
            columns: info.columns,
        })
    }
}

/// Pick the engine reader function by file extension. Anything unknown is
/// treated as delimited text and handed to the CSV sniffer.
fn reader_function_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("parquet") => "read_parquet",
        Some("json") | Some("jsonl") | Some("ndjson") => "read_json_auto",
        _ => "read_csv_auto",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_a_csv_file_into_a_table() {
        let dir = TempDir::new().unwrap();
        let file = write_csv(&dir, "sales.csv", "id,amount\n1,9.5\n2,3.25\n3,11.0\n");
        let store = TableStore::open_in_memory().unwrap();

        let report = TableLoader::new(&store).load(&[file.clone()]);

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.error_count(), 0);
        let loaded = &report.loaded[0];
        assert_eq!(loaded.table_name, "sales");
        assert_eq!(loaded.row_count, 3);
        assert_eq!(loaded.file_path, file.display().to_string());
        let names: Vec<_> = loaded.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "amount"]);
    }

    #[test]
    fn awkward_file_names_become_safe_identifiers() {
        let dir = TempDir::new().unwrap();
        let file = write_csv(&dir, "2024 sales-report.csv", "id\n1\n");
        let store = TableStore::open_in_memory().unwrap();

        let report = TableLoader::new(&store).load(&[file]);

        assert_eq!(report.loaded[0].table_name, "table_2024_sales_report");
    }

    #[test]
    fn a_bad_file_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let good = write_csv(&dir, "good.csv", "id\n1\n2\n");
        let missing = dir.path().join("missing.csv");
        let store = TableStore::open_in_memory().unwrap();

        let report = TableLoader::new(&store).load(&[missing.clone(), good]);

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.loaded[0].table_name, "good");
        assert!(report.errors[0].starts_with(&format!("Failed to load {}", missing.display())));
    }

    #[test]
    fn reloading_replaces_the_table_instead_of_duplicating_it() {
        let dir = TempDir::new().unwrap();
        let file = write_csv(&dir, "items.csv", "id\n1\n2\n");
        let store = TableStore::open_in_memory().unwrap();
        let loader = TableLoader::new(&store);

        loader.load(&[file.clone()]);
        fs::write(&file, "id\n1\n2\n3\n").unwrap();
        let report = loader.load(&[file]);

        assert_eq!(report.loaded[0].row_count, 3);
        let tables = SchemaCatalog::new(&store).list_tables();
        assert_eq!(tables, vec!["items".to_string()]);
    }

    #[test]
    fn empty_batch_produces_empty_report() {
        let store = TableStore::open_in_memory().unwrap();
        let report = TableLoader::new(&store).load(&[]);
        assert!(report.loaded.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn reader_is_chosen_by_extension() {
        assert_eq!(reader_function_for(Path::new("a.csv")), "read_csv_auto");
        assert_eq!(reader_function_for(Path::new("a.PARQUET")), "read_parquet");
        assert_eq!(reader_function_for(Path::new("a.jsonl")), "read_json_auto");
        assert_eq!(reader_function_for(Path::new("a.txt")), "read_csv_auto");
        assert_eq!(reader_function_for(Path::new("noext")), "read_csv_auto");
    }
}
