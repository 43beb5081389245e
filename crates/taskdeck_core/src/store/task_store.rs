//! Insertion-ordered task storage with a derived display ordering.
//!
//! # Responsibility
//! - Hold the task sequence for one session in add order.
//! - Derive the sorted display view used for rendering and for mapping
//!   1-based display positions back to stored tasks.
//!
//! # Invariants
//! - No two stored tasks share an id.
//! - Display sorting is stable: equal `(rank, deadline)` keys keep
//!   insertion order.

use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;

/// Sort key for the display view: priority rank first, then deadline with
/// absent deadlines after every present one.
fn display_key(task: &Task) -> (u8, NaiveDate) {
    (task.priority.rank(), task.deadline.unwrap_or(NaiveDate::MAX))
}

/// Ordered in-memory task sequence. Insertion order is add order, not
/// display order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task at the end of insertion order.
    ///
    /// Both fresh adds and undo-of-remove re-insertions land here; undo does
    /// not restore original insertion positions.
    pub fn append(&mut self, task: Task) {
        debug_assert!(
            !self.contains(task.id),
            "task ids must be unique within a store"
        );
        self.tasks.push(task);
    }

    /// Removes a task by identity, regardless of its current position.
    ///
    /// Returns `None` when no stored task has the given id.
    pub fn remove_by_id(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Removes the task shown at a 1-based display position.
    ///
    /// The position refers to the sorted display view, not insertion order.
    /// Returns `None` when the position is outside `[1, len]`.
    pub fn remove_by_display_position(&mut self, position: usize) -> Option<Task> {
        if position == 0 || position > self.tasks.len() {
            return None;
        }
        let id = self.display_order()[position - 1].id;
        self.remove_by_id(id)
    }

    /// Tasks in display order: `(priority rank asc, deadline asc)` with
    /// absent deadlines last, stable for equal keys.
    pub fn display_order(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by_key(|task| display_key(task));
        view
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::task::{parse_deadline, Priority, Task};

    fn task(name: &str, priority: Priority, deadline: Option<&str>) -> Task {
        let deadline = deadline.map(|text| parse_deadline(text).unwrap());
        Task::new(name, priority, deadline).unwrap()
    }

    #[test]
    fn display_order_sorts_by_rank_then_deadline() {
        let mut store = TaskStore::new();
        store.append(task("late low", Priority::Low, None));
        store.append(task("high", Priority::High, None));
        store.append(task("medium dated", Priority::Medium, Some("2025-01-01")));
        store.append(task("medium undated", Priority::Medium, None));

        let names: Vec<&str> = store
            .display_order()
            .iter()
            .map(|task| task.name.as_str())
            .collect();
        assert_eq!(names, ["high", "medium dated", "medium undated", "late low"]);
    }

    #[test]
    fn display_order_is_stable_for_equal_keys() {
        let mut store = TaskStore::new();
        store.append(task("first", Priority::High, Some("2025-06-01")));
        store.append(task("second", Priority::High, Some("2025-06-01")));

        let names: Vec<&str> = store
            .display_order()
            .iter()
            .map(|task| task.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn remove_by_id_ignores_position_shifts() {
        let mut store = TaskStore::new();
        let keep = task("keep", Priority::Low, None);
        let target = task("target", Priority::Low, None);
        let target_id = target.id;
        store.append(target);
        store.append(keep);

        let removed = store.remove_by_id(target_id).unwrap();
        assert_eq!(removed.name, "target");
        assert_eq!(store.len(), 1);
        assert!(store.remove_by_id(target_id).is_none());
    }
}
