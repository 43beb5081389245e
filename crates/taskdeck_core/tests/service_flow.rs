use taskdeck_core::{
    ActionKind, AddWarning, HistoryLog, Priority, Task, TaskService, TaskServiceError, TaskStore,
    TaskValidationError, UndoOutcome,
};

fn view_names(service: &TaskService) -> Vec<String> {
    service
        .view_tasks()
        .into_iter()
        .map(|row| row.task.name)
        .collect()
}

#[test]
fn view_returns_adds_sorted_by_rank_then_deadline() {
    let mut service = TaskService::new();
    service.add_task("A", "Low", None).unwrap();
    service.add_task("B", "High", None).unwrap();
    service.add_task("C", "Medium", Some("2025-01-01")).unwrap();

    assert_eq!(service.task_count(), 3);
    assert_eq!(view_names(&service), ["B", "C", "A"]);

    let positions: Vec<usize> = service.view_tasks().iter().map(|row| row.position).collect();
    assert_eq!(positions, [1, 2, 3]);
}

#[test]
fn view_on_fresh_session_is_empty() {
    let service = TaskService::new();
    assert!(service.view_tasks().is_empty());
}

#[test]
fn add_with_empty_name_never_mutates() {
    let mut service = TaskService::new();
    let err = service.add_task("   ", "High", None).unwrap_err();

    assert_eq!(
        err,
        TaskServiceError::Validation(TaskValidationError::EmptyName)
    );
    assert_eq!(service.task_count(), 0);
    // The failed add must not leave anything to undo.
    assert_eq!(service.undo_last().unwrap(), UndoOutcome::NothingToUndo);
}

#[test]
fn unknown_priority_is_coerced_to_low() {
    let mut service = TaskService::new();
    let outcome = service.add_task("chore", "urgent", None).unwrap();
    assert_eq!(outcome.task.priority, Priority::Low);
    assert!(outcome.warnings.is_empty());

    let outcome = service.add_task("spelled oddly", "hIgH", None).unwrap();
    assert_eq!(outcome.task.priority, Priority::High);
}

#[test]
fn bad_deadline_degrades_to_warning_without_blocking() {
    let mut service = TaskService::new();
    let outcome = service
        .add_task("call dentist", "Medium", Some("next tuesday"))
        .unwrap();

    assert_eq!(outcome.task.deadline, None);
    assert_eq!(
        outcome.warnings,
        [AddWarning::DeadlineIgnored {
            input: "next tuesday".to_string()
        }]
    );
    assert_eq!(service.task_count(), 1);
}

#[test]
fn blank_deadline_means_no_deadline_and_no_warning() {
    let mut service = TaskService::new();
    let outcome = service.add_task("no due date", "Low", Some("  ")).unwrap();
    assert_eq!(outcome.task.deadline, None);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn remove_position_outside_range_never_mutates() {
    let mut service = TaskService::new();
    assert_eq!(
        service.remove_task_at(1).unwrap_err(),
        TaskServiceError::PositionOutOfRange {
            position: 1,
            count: 0
        }
    );

    service.add_task("only", "Low", None).unwrap();
    for position in [0, 2] {
        assert_eq!(
            service.remove_task_at(position).unwrap_err(),
            TaskServiceError::PositionOutOfRange {
                position,
                count: 1
            }
        );
    }
    assert_eq!(service.task_count(), 1);
}

#[test]
fn remove_targets_display_order_not_insertion_order() {
    let mut service = TaskService::new();
    service.add_task("added first", "Low", None).unwrap();
    service.add_task("added second", "High", None).unwrap();

    // Display position 1 is the High task even though it was added last.
    let removed = service.remove_task_at(1).unwrap();
    assert_eq!(removed.name, "added second");
    assert_eq!(view_names(&service), ["added first"]);
}

#[test]
fn undo_of_add_removes_the_task() {
    let mut service = TaskService::new();
    let added = service.add_task("transient", "High", None).unwrap().task;

    let outcome = service.undo_last().unwrap();
    assert_eq!(outcome, UndoOutcome::RemovedAdded(added));
    assert_eq!(service.task_count(), 0);
}

#[test]
fn undo_of_remove_restores_the_same_task_set() {
    let mut service = TaskService::new();
    service.add_task("stays", "Medium", None).unwrap();
    let before: Vec<Task> = service.view_tasks().into_iter().map(|row| row.task).collect();

    let removed = service.remove_task_at(1).unwrap();
    let outcome = service.undo_last().unwrap();
    assert_eq!(outcome, UndoOutcome::RestoredRemoved(removed));

    let after: Vec<Task> = service.view_tasks().into_iter().map(|row| row.task).collect();
    assert_eq!(after, before);
}

#[test]
fn add_remove_undo_round_trip() {
    let mut service = TaskService::new();
    service
        .add_task("Write report", "high", Some("2025-03-01"))
        .unwrap();
    assert_eq!(view_names(&service), ["Write report"]);

    service.remove_task_at(1).unwrap();
    assert!(service.view_tasks().is_empty());

    service.undo_last().unwrap();
    assert_eq!(view_names(&service), ["Write report"]);
}

#[test]
fn undo_on_fresh_session_reports_empty_outcome() {
    let mut service = TaskService::new();
    assert_eq!(service.undo_last().unwrap(), UndoOutcome::NothingToUndo);
}

#[test]
fn repeated_undo_keeps_popping_further_back() {
    let mut service = TaskService::new();
    service.add_task("first", "Low", None).unwrap();
    service.add_task("second", "Low", None).unwrap();

    assert!(matches!(
        service.undo_last().unwrap(),
        UndoOutcome::RemovedAdded(task) if task.name == "second"
    ));
    assert!(matches!(
        service.undo_last().unwrap(),
        UndoOutcome::RemovedAdded(task) if task.name == "first"
    ));
    assert_eq!(service.undo_last().unwrap(), UndoOutcome::NothingToUndo);
    assert_eq!(service.task_count(), 0);
}

#[test]
fn undo_of_add_with_missing_task_is_a_defined_failure() {
    // Seed a session whose newest recorded add no longer has its task in
    // the store; unreachable through the public operations, but the undo
    // path must fail cleanly rather than panic.
    let ghost = Task::new("ghost", Priority::Low, None).unwrap();
    let mut history = HistoryLog::new();
    history.record(ActionKind::Add, ghost.clone());
    let mut service = TaskService::with_state(TaskStore::new(), history);

    let err = service.undo_last().unwrap_err();
    assert_eq!(err, TaskServiceError::UndoTargetMissing(ghost.id));
    assert_eq!(service.task_count(), 0);

    // The action was still consumed.
    assert_eq!(service.undo_last().unwrap(), UndoOutcome::NothingToUndo);
}
