//! Persisted blob format for the task collection.
//!
//! The blob is a JSON array of `{id, text, completed, createdAt}` records in
//! insertion order. `createdAt` is RFC 3339 UTC with millisecond precision.

use crate::model::task::{Task, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Blob decode/encode failures.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    /// Record at `index` parsed but violates task text rules.
    InvalidRecord {
        index: usize,
        reason: TaskValidationError,
    },
    /// Two records share one id.
    DuplicateId(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed task blob: {err}"),
            Self::InvalidRecord { index, reason } => {
                write!(f, "invalid task record at index {index}: {reason}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id in blob: {id}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidRecord { reason, .. } => Some(reason),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the collection into its persisted blob form.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a persisted blob back into a collection.
///
/// Rejects the whole blob when any record is malformed, holds invalid text,
/// or repeats an id seen earlier.
pub fn decode_tasks(blob: &str) -> Result<Vec<Task>, CodecError> {
    let tasks: Vec<Task> = serde_json::from_str(blob)?;
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|reason| CodecError::InvalidRecord { index, reason })?;
        if !seen.insert(task.id()) {
            return Err(CodecError::DuplicateId(task.id().to_string()));
        }
    }
    Ok(tasks)
}
