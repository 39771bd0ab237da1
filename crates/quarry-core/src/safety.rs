//! Keyword deny-list and the engine-free validation stages.
//!
//! The scan is deliberately coarse: case-insensitive *substring* containment
//! over the whole statement, including identifiers and string literals. A
//! query naming a column `created_at` is rejected because it contains
//! `CREATE`. That trades precision for the guarantee that no mutating or
//! privileged statement ever slips through; callers wanting the full
//! three-stage validation (including the engine's plan dry run) go through
//! `quarry-duckdb`.

use crate::types::RejectReason;

/// Keywords that mark a statement unsafe, in scan order. `EXEC` precedes
/// `EXECUTE`, so statements containing `EXECUTE` are reported as `EXEC`.
pub const DENY_KEYWORDS: [&str; 12] = [
    "DROP", "DELETE", "INSERT", "UPDATE", "ALTER", "CREATE", "TRUNCATE", "EXEC", "EXECUTE",
    "CALL", "GRANT", "REVOKE",
];

/// True when the text contains no statement at all.
pub fn is_blank_statement(sql: &str) -> bool {
    sql.trim().is_empty()
}

/// First deny-listed keyword contained (case-insensitively) in `sql`, in
/// [`DENY_KEYWORDS`] order.
pub fn find_denied_keyword(sql: &str) -> Option<&'static str> {
    let upper = sql.to_uppercase();
    DENY_KEYWORDS.iter().copied().find(|kw| upper.contains(kw))
}

/// Run the two engine-free validation stages: blank check, then deny-list
/// scan. Returns the first rejection, or `None` when the statement may
/// proceed to the plan dry run.
pub fn static_reject(sql: &str) -> Option<RejectReason> {
    if is_blank_statement(sql) {
        return Some(RejectReason::Empty);
    }
    find_denied_keyword(sql).map(|keyword| RejectReason::DangerousKeyword(keyword.to_string()))
}
