//! In-process answer cache: question (plus focus table) to generated SQL.
//!
//! Only the generation step is cached. A hit skips the provider round-trip
//! but still goes through validation and execution, so cached SQL is never
//! trusted further than fresh SQL.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use quarry_core::hashing::query_hash;

struct CacheEntry {
    sql: String,
    stored_at: Instant,
}

pub struct SqlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl SqlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cache key for a question/focus pair. The focus table is part of the
    /// key because it changes the prompt, and so the generated SQL.
    fn key(question: &str, focus_table: Option<&str>) -> String {
        query_hash(&format!(
            "{}\n[focus:{}]",
            question,
            focus_table.unwrap_or("")
        ))
    }

    pub fn get(&self, question: &str, focus_table: Option<&str>) -> Option<String> {
        let key = Self::key(question, focus_table);
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(&key) {
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.sql.clone());
            }
        }
        entries.remove(&key);
        None
    }

    pub fn put(&self, question: &str, focus_table: Option<&str>, sql: &str) {
        let key = Self::key(question, focus_table);
        self.entries.lock().insert(
            key,
            CacheEntry {
                sql: sql.to_string(),
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
