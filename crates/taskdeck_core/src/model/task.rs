//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its priority/deadline fields.
//! - Provide lenient priority parsing and strict deadline parsing.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `name` is never empty or whitespace-only.
//! - `deadline`, when present, is a valid calendar date.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task in a session.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Deadlines must match this shape before calendar validation; chrono alone
/// would accept unpadded inputs like `2025-3-1`.
static DEADLINE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid deadline regex"));

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Urgency level used as the primary display-sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parses trimmed, case-insensitive user input.
    ///
    /// Returns `None` for anything outside the three accepted names; callers
    /// decide the fallback (the add flow coerces to `Low`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Display-sort rank: `High=1`, `Medium=2`, `Low=3`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Canonical title-cased name for rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-time invariant violations for `Task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Name is empty after trimming surrounding whitespace.
    EmptyName,
    /// Caller-provided id is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::NilId => write!(f, "task id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// Failure to parse a deadline string as a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineParseError {
    /// The rejected raw input, trimmed.
    pub input: String,
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid deadline `{}`; expected YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for DeadlineParseError {}

/// Parses a deadline under the exact `YYYY-MM-DD` calendar format.
///
/// # Contract
/// - Input is trimmed before parsing.
/// - Shape and calendar validity are both enforced (`2025-02-30` is rejected).
pub fn parse_deadline(input: &str) -> Result<NaiveDate, DeadlineParseError> {
    let trimmed = input.trim();
    if !DEADLINE_SHAPE_RE.is_match(trimmed) {
        return Err(DeadlineParseError {
            input: trimmed.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT).map_err(|_| DeadlineParseError {
        input: trimmed.to_string(),
    })
}

/// Canonical record for a unit of work.
///
/// Immutable after construction: the only lifecycle events are removal and
/// undo-driven re-insertion, both of which move the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for identity-based removal and undo targeting.
    pub id: TaskId,
    /// Human-readable name, trimmed and non-empty.
    pub name: String,
    /// Urgency level; lenient input coercion happens before construction.
    pub priority: Priority,
    /// Optional due date; `None` sorts after every present deadline.
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyName` when `name` trims to nothing.
    pub fn new(
        name: impl Into<String>,
        priority: Priority,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), name, priority, deadline)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by tests that need deterministic identity.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` for the nil UUID.
    /// - `TaskValidationError::EmptyName` when `name` trims to nothing.
    pub fn with_id(
        id: TaskId,
        name: impl Into<String>,
        priority: Priority,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            priority,
            deadline,
        })
    }

    /// Deadline text for display rows.
    pub fn deadline_label(&self) -> String {
        match self.deadline {
            Some(date) => date.format(DEADLINE_FORMAT).to_string(),
            None => "No deadline".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_deadline, Priority};

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" medium "), Some(Priority::Medium));
        assert_eq!(Priority::parse("Low"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::parse(""), None);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn parse_deadline_requires_padded_calendar_dates() {
        assert!(parse_deadline("2025-03-01").is_ok());
        assert!(parse_deadline(" 2025-03-01 ").is_ok());

        let shape = parse_deadline("2025-3-1").unwrap_err();
        assert_eq!(shape.input, "2025-3-1");
        assert!(parse_deadline("tomorrow").is_err());
        // Shape-valid but not a real calendar date.
        assert!(parse_deadline("2025-02-30").is_err());
    }
}
