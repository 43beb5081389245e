//! Core domain logic for taskdeck.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::task::{
    parse_deadline, DeadlineParseError, Priority, Task, TaskId, TaskValidationError,
};
pub use service::task_service::{
    AddOutcome, AddWarning, TaskService, TaskServiceError, TaskView, UndoOutcome,
};
pub use store::history::{Action, ActionKind, HistoryLog};
pub use store::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
