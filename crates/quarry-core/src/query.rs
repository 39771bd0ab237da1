//! Candidate-query lifecycle.
//!
//! One `CandidateQuery` tracks a single request from question to outcome:
//! `Created → Generated → {Rejected | Validated} → {ExecutedSuccess |
//! ExecutedFailure}`. The execution slot can only be filled once validation
//! has passed, so a rejected candidate is terminal by construction.

use crate::types::{ExecutionOutcome, ValidationOutcome};
use serde::{Deserialize, Serialize};

/// Where a candidate currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryState {
    Created,
    Generated,
    Rejected,
    Validated,
    ExecutedSuccess,
    ExecutedFailure,
}

/// A transient record of one question → SQL → result round trip. Never
/// persisted; scoped to a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionOutcome>,
}

impl CandidateQuery {
    pub fn new(question: impl Into<String>, focus_table: Option<String>) -> Self {
        Self {
            question: question.into(),
            focus_table,
            sql: None,
            validation: None,
            execution: None,
        }
    }

    /// Record the SQL text produced for this question.
    pub fn generated(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Record the safety validator's verdict.
    pub fn validated(mut self, outcome: ValidationOutcome) -> Self {
        self.validation = Some(outcome);
        self
    }

    /// Record the execution outcome. Ignored unless the most recent
    /// validation verdict was `Valid`; a rejected statement can never carry
    /// an execution result.
    pub fn executed(mut self, outcome: ExecutionOutcome) -> Self {
        if matches!(self.validation, Some(ValidationOutcome::Valid)) {
            self.execution = Some(outcome);
        }
        self
    }

    pub fn state(&self) -> QueryState {
        match (&self.execution, &self.validation, &self.sql) {
            (Some(ExecutionOutcome::Success(_)), _, _) => QueryState::ExecutedSuccess,
            (Some(ExecutionOutcome::Failure(_)), _, _) => QueryState::ExecutedFailure,
            (None, Some(ValidationOutcome::Invalid(_)), _) => QueryState::Rejected,
            (None, Some(ValidationOutcome::Valid), _) => QueryState::Validated,
            (None, None, Some(_)) => QueryState::Generated,
            (None, None, None) => QueryState::Created,
        }
    }
}
