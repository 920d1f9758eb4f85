//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Own text normalization and validation rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and holds 1..=100 characters.
//! - `created_at` carries millisecond precision, matching the persisted form.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum task text length, in characters, after trimming.
pub const MAX_TASK_TEXT_CHARS: usize = 100;

/// Opaque stable identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Rejection reasons for user-entered task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty after trimming.
    Empty,
    /// Trimmed text exceeds [`MAX_TASK_TEXT_CHARS`].
    TooLong { len: usize },
    /// Stored text carries surrounding whitespace that input would have trimmed.
    Untrimmed,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Todo cannot be empty"),
            Self::TooLong { .. } => write!(f, "Todo must be less than 100 characters"),
            Self::Untrimmed => write!(f, "Todo text has surrounding whitespace"),
        }
    }
}

impl Error for TaskValidationError {}

/// Trims `raw` and checks it against task text rules.
///
/// Returns the trimmed text that a new task would store.
pub fn normalize_task_text(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(TaskValidationError::Empty);
    }
    if len > MAX_TASK_TEXT_CHARS {
        return Err(TaskValidationError::TooLong { len });
    }
    Ok(trimmed.to_string())
}

/// One user-entered item with completion state and creation time.
///
/// Fields are read-only outside the crate; the store is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) text: String,
    pub(crate) completed: bool,
    #[serde(with = "iso_millis")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from raw input, validating and trimming the text.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - `created_at` is truncated to milliseconds.
    pub fn new(
        id: TaskId,
        raw_text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let text = normalize_task_text(raw_text)?;
        Ok(Self::from_normalized(id, text, created_at))
    }

    /// Builds a task from text that already passed [`normalize_task_text`].
    pub(crate) fn from_normalized(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-checks text rules on a record that bypassed [`Task::new`],
    /// e.g. one decoded from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        let normalized = normalize_task_text(self.text.as_str())?;
        if normalized != self.text {
            return Err(TaskValidationError::Untrimmed);
        }
        Ok(())
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Serde adapter for RFC 3339 timestamps with millisecond precision.
///
/// Finer input precision is truncated on load.
pub(crate) mod iso_millis {
    use super::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.as_str())
            .map(|value| value.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_task_text, Task, TaskId, TaskValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_task_text("  Buy milk \n").unwrap(), "Buy milk");
    }

    #[test]
    fn normalize_counts_characters_not_bytes() {
        let text = "é".repeat(100);
        assert_eq!(normalize_task_text(&text).unwrap(), text);
        let err = normalize_task_text(&"é".repeat(101)).unwrap_err();
        assert_eq!(err, TaskValidationError::TooLong { len: 101 });
    }

    #[test]
    fn length_limit_applies_after_trimming() {
        let padded = format!("   {}   ", "x".repeat(100));
        assert_eq!(normalize_task_text(&padded).unwrap().len(), 100);
    }

    #[test]
    fn new_truncates_timestamp_to_millis() {
        let at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let task = Task::new(TaskId::from("t-1"), "write docs", at).unwrap();
        assert_eq!(task.created_at().timestamp_subsec_nanos(), 123_000_000);
        assert!(!task.is_completed());
    }

    #[test]
    fn serialization_uses_camel_case_wire_fields() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let task = Task::new(TaskId::from("abc"), "Call Bob", at).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["text"], "Call Bob");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn validation_messages_match_ui_copy() {
        assert_eq!(TaskValidationError::Empty.to_string(), "Todo cannot be empty");
        assert_eq!(
            TaskValidationError::TooLong { len: 101 }.to_string(),
            "Todo must be less than 100 characters"
        );
    }

    #[test]
    fn validate_rejects_text_that_input_would_have_trimmed() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut task = Task::new(TaskId::from("t-1"), "padded", at).unwrap();
        assert_eq!(task.validate(), Ok(()));
        task.text = "  padded  ".to_string();
        assert_eq!(task.validate(), Err(TaskValidationError::Untrimmed));
        task.text = "   ".to_string();
        assert_eq!(task.validate(), Err(TaskValidationError::Empty));
    }

    #[test]
    fn deserialize_truncates_sub_millisecond_precision() {
        let json = r#"{"id":"t-1","text":"x","completed":false,"createdAt":"2024-05-01T12:30:00.123456Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.created_at().timestamp_subsec_nanos(), 123_000_000);
    }
}
