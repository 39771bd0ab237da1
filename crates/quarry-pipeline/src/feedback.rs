//! Append-only feedback log.
//!
//! Each entry records how a user judged one generated answer. The log is a
//! JSONL file: one entry per line, appended on write, never rewritten.
//! Malformed lines are skipped on read so one bad record cannot poison the
//! stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::PipelineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub question: String,
    pub sql: String,
    pub kind: FeedbackKind,
    #[serde(default)]
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEntry {
    pub fn new(
        question: impl Into<String>,
        sql: impl Into<String>,
        kind: FeedbackKind,
        comment: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            sql: sql.into(),
            kind,
            comment,
            timestamp: Utc::now(),
        }
    }
}

/// Aggregate view over the whole log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackStats {
    pub total_feedback: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
}

pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one entry.
    pub fn record(&self, entry: &FeedbackEntry) -> PipelineResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(entry)?;
        writeln!(file, "{line}")?;
        debug!(kind = ?entry.kind, "recorded feedback");
        Ok(())
    }

    /// All parseable entries, in file order. A missing file is an empty log.
    pub fn entries(&self) -> PipelineResult<Vec<FeedbackEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(err) => warn!(error = %err, "skipping malformed feedback line"),
            }
        }
        Ok(entries)
    }

    pub fn stats(&self) -> PipelineResult<FeedbackStats> {
        let entries = self.entries()?;
        let total = entries.len();
        let positive = entries
            .iter()
            .filter(|e| e.kind == FeedbackKind::Positive)
            .count();
        let negative = total - positive;
        let (positive_ratio, negative_ratio) = if total == 0 {
            (0.0, 0.0)
        } else {
            (positive as f64 / total as f64, negative as f64 / total as f64)
        };
        Ok(FeedbackStats {
            total_feedback: total,
            positive_count: positive,
            negative_count: negative,
            positive_ratio,
            negative_ratio,
        })
    }

    /// The `limit` newest entries, newest first.
    pub fn recent(&self, limit: usize) -> PipelineResult<Vec<FeedbackEntry>> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }
}
