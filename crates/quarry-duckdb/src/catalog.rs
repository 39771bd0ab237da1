//! Schema introspection over the store.
//!
//! The catalog is error-tolerant on purpose: callers assemble prompt
//! context from it, and a table that cannot be described should degrade to
//! an empty entry rather than abort the whole request.

use tracing::warn;

use quarry_core::types::{ColumnMeta, TableInfo};

use crate::error::StoreResult;
use crate::store::TableStore;

pub struct SchemaCatalog<'a> {
    store: &'a TableStore,
}

impl<'a> SchemaCatalog<'a> {
    pub fn new(store: &'a TableStore) -> Self {
        Self { store }
    }

    /// Names of all tables currently in the store. Empty on any failure.
    pub fn list_tables(&self) -> Vec<String> {
        let listed = self.store.with_connection(|conn| {
            let mut stmt = conn.prepare("SHOW TABLES")?;
            let mut rows = stmt.query([])?;
            let mut names = Vec::new();
            while let Some(row) = rows.next()? {
                names.push(row.get::<_, String>(0)?);
            }
            Ok(names)
        });
        match listed {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "failed to list tables");
                Vec::new()
            }
        }
    }

    /// Shape of one table. A table that cannot be described comes back as
    /// an empty [`TableInfo`] carrying just the name.
    pub fn describe(&self, table: &str) -> TableInfo {
        match self.table_info(table) {
            Ok(info) => info,
            Err(err) => {
                warn!(table, error = %err, "failed to describe table");
                TableInfo::empty(table)
            }
        }
    }

    /// Describe every table in the store.
    pub fn overview(&self) -> Vec<TableInfo> {
        self.list_tables()
            .into_iter()
            .map(|name| self.describe(&name))
            .collect()
    }

    fn table_info(&self, table: &str) -> StoreResult<TableInfo> {
        self.store.with_connection(|conn| {
            let row_count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;

            let mut stmt = conn.prepare(&format!("DESCRIBE {table}"))?;
            let mut rows = stmt.query([])?;
            let mut columns = Vec::new();
            while let Some(row) = rows.next()? {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                columns.push(ColumnMeta::new(name, data_type));
            }

            Ok(TableInfo {
                name: table.to_string(),
                row_count: row_count.max(0) as usize,
                columns,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::TableLoader;
    use std::fs;
    use tempfile::TempDir;

    fn store_with_sales() -> TableStore {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sales.csv");
        fs::write(&file, "id,amount\n1,9.5\n2,3.25\n3,11.0\n").unwrap();
        let store = TableStore::open_in_memory().unwrap();
        let report = TableLoader::new(&store).load(&[file]);
        assert_eq!(report.success_count(), 1);
        store
    }

    #[test]
    fn lists_loaded_tables() {
        let store = store_with_sales();
        assert_eq!(SchemaCatalog::new(&store).list_tables(), vec!["sales".to_string()]);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = TableStore::open_in_memory().unwrap();
        assert!(SchemaCatalog::new(&store).list_tables().is_empty());
    }

    #[test]
    fn describe_reports_columns_and_row_count() {
        let store = store_with_sales();
        let info = SchemaCatalog::new(&store).describe("sales");
        assert_eq!(info.name, "sales");
        assert_eq!(info.row_count, 3);
        let shapes: Vec<_> = info
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type.as_str()))
            .collect();
        assert_eq!(shapes, vec![("id", "BIGINT"), ("amount", "DOUBLE")]);
    }

    #[test]
    fn describe_of_missing_table_degrades_to_empty() {
        let store = TableStore::open_in_memory().unwrap();
        let info = SchemaCatalog::new(&store).describe("nope");
        assert_eq!(info.name, "nope");
        assert_eq!(info.row_count, 0);
        assert!(info.columns.is_empty());
    }

    #[test]
    fn overview_covers_every_table() {
        let store = store_with_sales();
        store
            .with_connection(|conn| {
                conn.execute_batch("CREATE TABLE extra AS SELECT 1 AS x")?;
                Ok(())
            })
            .unwrap();
        let mut names: Vec<_> = SchemaCatalog::new(&store)
            .overview()
            .into_iter()
            .map(|t| t.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["extra".to_string(), "sales".to_string()]);
    }

    #[test]
    fn closed_store_degrades_instead_of_failing() {
        let store = store_with_sales();
        store.close();
        let catalog = SchemaCatalog::new(&store);
        assert!(catalog.list_tables().is_empty());
        assert!(catalog.describe("sales").columns.is_empty());
    }
}
