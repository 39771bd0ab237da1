//! Normalization of raw generated text into a bare SQL statement.

/// Strip markdown code fencing from generated text.
///
/// Trims whitespace, removes a leading ```` ```sql ```` fence marker and a
/// trailing ```` ``` ```` marker if present, then trims again. Purely
/// textual; no semantic validation happens here.
pub fn extract_sql(raw: &str) -> String {
    let mut sql = raw.trim();
    if let Some(rest) = sql.strip_prefix("```sql") {
        sql = rest;
    }
    if let Some(rest) = sql.strip_suffix("```") {
        sql = rest;
    }
    sql.trim().to_string()
}
