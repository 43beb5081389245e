//! Task list use-case service.
//!
//! # Responsibility
//! - Expose the four session operations (add, view, remove, undo) to
//!   front-end callers as typed outcome values.
//! - Own one `TaskStore` + one `HistoryLog` pair per session.
//!
//! # Invariants
//! - Every successful mutation records exactly one history action.
//! - Failed operations never mutate the store.
//! - Diagnostics stay metadata-only; task names never reach the log.

use crate::model::task::{parse_deadline, Priority, Task, TaskId, TaskValidationError};
use crate::store::history::{ActionKind, HistoryLog};
use crate::store::task_store::TaskStore;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task list use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Task construction invariant violated (empty name).
    Validation(TaskValidationError),
    /// Removal position outside the current display range.
    PositionOutOfRange { position: usize, count: usize },
    /// Undo of an add whose task was already removed by a later,
    /// un-undone remove. The action is consumed; the store is untouched.
    UndoTargetMissing(TaskId),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PositionOutOfRange { position, count } => {
                write!(f, "task number {position} is out of range [1, {count}]")
            }
            Self::UndoTargetMissing(id) => {
                write!(f, "undo target is no longer in the task list: {id}")
            }
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Non-blocking degradation reported alongside a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWarning {
    /// Deadline input failed `YYYY-MM-DD` parsing; the task was created
    /// without a deadline.
    DeadlineIgnored { input: String },
}

impl Display for AddWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeadlineIgnored { input } => {
                write!(f, "invalid deadline `{input}`; deadline ignored")
            }
        }
    }
}

/// Result envelope for a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// The created task as stored.
    pub task: Task,
    /// Degradations the caller should surface (empty on a clean add).
    pub warnings: Vec<AddWarning>,
}

/// One row of the sorted display view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// 1-based index into the display ordering; valid for `remove_task_at`.
    pub position: usize,
    pub task: Task,
}

/// Outcome of an undo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// History was empty; nothing changed. A normal result, not an error.
    NothingToUndo,
    /// The newest action was an add; its task was removed again.
    RemovedAdded(Task),
    /// The newest action was a remove; its task was re-appended at the end
    /// of insertion order (original position is deliberately not restored).
    RestoredRemoved(Task),
}

/// Session facade owning the task sequence and its undo history.
///
/// Each instance is an independent session; nothing is shared or global.
#[derive(Debug, Default)]
pub struct TaskService {
    store: TaskStore,
    history: HistoryLog,
}

impl TaskService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service over caller-provided state.
    ///
    /// Lets tests and embedding callers seed a session instead of replaying
    /// operations.
    pub fn with_state(store: TaskStore, history: HistoryLog) -> Self {
        Self { store, history }
    }

    /// Number of currently active tasks.
    pub fn task_count(&self) -> usize {
        self.store.len()
    }

    /// Creates a task from raw user input and records the add.
    ///
    /// # Contract
    /// - `name` is trimmed; empty input fails with no mutation.
    /// - `priority_input` outside High/Medium/Low (case-insensitive) is
    ///   coerced to `Low`; a lenient default, not an error.
    /// - Unparseable `deadline_input` degrades to no deadline plus an
    ///   `AddWarning`; blank or absent input means no deadline and no
    ///   warning.
    pub fn add_task(
        &mut self,
        name: &str,
        priority_input: &str,
        deadline_input: Option<&str>,
    ) -> Result<AddOutcome, TaskServiceError> {
        let priority = Priority::parse(priority_input).unwrap_or_else(|| {
            debug!("event=priority_coerced module=service status=ok fallback=low");
            Priority::Low
        });

        let mut warnings = Vec::new();
        let deadline = match deadline_input.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => None,
            Some(raw) => match parse_deadline(raw) {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!("event=deadline_ignored module=service status=degraded");
                    warnings.push(AddWarning::DeadlineIgnored { input: err.input });
                    None
                }
            },
        };

        let task = Task::new(name, priority, deadline)?;
        self.store.append(task.clone());
        self.history.record(ActionKind::Add, task.clone());
        info!(
            "event=task_added module=service status=ok id={} priority={} has_deadline={} store_len={}",
            task.id,
            task.priority,
            task.deadline.is_some(),
            self.store.len()
        );

        Ok(AddOutcome { task, warnings })
    }

    /// Tasks in display order with their 1-based positions.
    ///
    /// Pure read; an empty session yields an empty list.
    pub fn view_tasks(&self) -> Vec<TaskView> {
        self.store
            .display_order()
            .into_iter()
            .enumerate()
            .map(|(index, task)| TaskView {
                position: index + 1,
                task: task.clone(),
            })
            .collect()
    }

    /// Removes the task at a 1-based display position and records the
    /// remove.
    ///
    /// # Errors
    /// - `PositionOutOfRange` when `position` is outside `[1, task_count]`;
    ///   the store is not mutated.
    pub fn remove_task_at(&mut self, position: usize) -> Result<Task, TaskServiceError> {
        let count = self.store.len();
        let removed = self
            .store
            .remove_by_display_position(position)
            .ok_or(TaskServiceError::PositionOutOfRange { position, count })?;

        self.history.record(ActionKind::Remove, removed.clone());
        info!(
            "event=task_removed module=service status=ok id={} store_len={}",
            removed.id,
            self.store.len()
        );
        Ok(removed)
    }

    /// Reverses the newest recorded action.
    ///
    /// # Contract
    /// - Empty history is a normal `NothingToUndo` outcome.
    /// - Undo of an add removes that exact task by identity.
    /// - Undo of a remove re-appends the task at the end of insertion order.
    ///
    /// # Errors
    /// - `UndoTargetMissing` when the add being undone refers to a task a
    ///   later remove already took out; the action stays consumed.
    pub fn undo_last(&mut self) -> Result<UndoOutcome, TaskServiceError> {
        let Some(action) = self.history.pop_last() else {
            info!("event=undo_skipped module=service status=ok reason=empty_history");
            return Ok(UndoOutcome::NothingToUndo);
        };

        match action.kind {
            ActionKind::Add => match self.store.remove_by_id(action.task.id) {
                Some(task) => {
                    info!(
                        "event=undo_applied module=service status=ok kind=add id={} store_len={}",
                        task.id,
                        self.store.len()
                    );
                    Ok(UndoOutcome::RemovedAdded(task))
                }
                None => {
                    warn!(
                        "event=undo_target_missing module=service status=error id={}",
                        action.task.id
                    );
                    Err(TaskServiceError::UndoTargetMissing(action.task.id))
                }
            },
            ActionKind::Remove => {
                let task = action.task;
                self.store.append(task.clone());
                info!(
                    "event=undo_applied module=service status=ok kind=remove id={} store_len={}",
                    task.id,
                    self.store.len()
                );
                Ok(UndoOutcome::RestoredRemoved(task))
            }
        }
    }
}
