//! Prompt rendering for the text-generation collaborator.
//!
//! The rendered text is the *entire* instruction sent to the generator: an
//! optional focus line, one schema line per table, the literal question, and
//! a fixed block of generation constraints. Nothing else leaks into the
//! prompt.

use crate::types::TableInfo;

/// Render the NL-to-SQL prompt for `question` over the given catalog
/// snapshot. When `focus_table` is set, it is named first as the primary
/// subject; all tables are always listed so joins remain possible.
pub fn build_prompt(question: &str, tables: &[TableInfo], focus_table: Option<&str>) -> String {
    let mut context_parts: Vec<String> = Vec::with_capacity(tables.len());
    for table in tables {
        let columns = table
            .columns
            .iter()
            .map(|col| format!("{} ({})", col.name, col.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        context_parts.push(format!(
            "Table '{}': {} ({} rows)",
            table.name, columns, table.row_count
        ));
    }
    let mut tables_context = context_parts.join("\n");

    if let Some(focus) = focus_table {
        tables_context = format!("Focus on table: {}\n\nAll tables:\n{}", focus, tables_context);
    }

    format!(
        "You are a SQL expert for DuckDB. Convert the user's natural language question to a valid DuckDB SQL query.

Available tables and their schemas:
{tables_context}

User question: {question}

Requirements:
1. Generate ONLY a valid DuckDB SQL query
2. Use proper table and column names as shown above
3. Include appropriate WHERE clauses, JOINs, and aggregations as needed
4. Use LIMIT clause if the result might be large
5. Do not include any explanations or markdown formatting
6. Ensure the query is safe and doesn't contain any dangerous operations

SQL Query:"
    )
}
