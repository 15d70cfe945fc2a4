//! Outcome model: the single result of evaluating one object.
//!
//! Callers decide exit codes and messages from this value. The evaluator
//! itself never terminates the process.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::StoreError;

/// What was determined and/or done for one object.
#[derive(Debug)]
pub enum EvaluationOutcome {
    /// Age is at or below the threshold.
    NotExpired,

    /// Expired, and removal was not requested.
    ExpiredKept,

    /// Expired and the delete call succeeded.
    ExpiredDeleted,

    /// Expired, the delete call failed. Not retried.
    ExpiredDeleteFailed(StoreError),
}

impl EvaluationOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            EvaluationOutcome::NotExpired => OutcomeKind::NotExpired,
            EvaluationOutcome::ExpiredKept => OutcomeKind::ExpiredKept,
            EvaluationOutcome::ExpiredDeleted => OutcomeKind::ExpiredDeleted,
            EvaluationOutcome::ExpiredDeleteFailed(_) => OutcomeKind::ExpiredDeleteFailed,
        }
    }

    pub fn is_expired(&self) -> bool {
        !matches!(self, EvaluationOutcome::NotExpired)
    }

    /// The delete failure, if any.
    pub fn delete_error(&self) -> Option<&StoreError> {
        match self {
            EvaluationOutcome::ExpiredDeleteFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// A payload-free label for [`EvaluationOutcome`], used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    NotExpired,
    ExpiredKept,
    ExpiredDeleted,
    ExpiredDeleteFailed,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::NotExpired => "not_expired",
            OutcomeKind::ExpiredKept => "expired_kept",
            OutcomeKind::ExpiredDeleted => "expired_deleted",
            OutcomeKind::ExpiredDeleteFailed => "expired_delete_failed",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
