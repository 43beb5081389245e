//! Interactive menu front end over `taskdeck_core`.
//!
//! # Responsibility
//! - Prompt, trim and convert raw user input before dispatching to core.
//! - Render core outcomes and errors as text; keep the loop alive after
//!   every reported error.

use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use taskdeck_core::{AddWarning, TaskService, TaskServiceError, UndoOutcome};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Interactive task list with priorities, deadlines and single-step undo")]
#[command(version)]
struct Args {
    /// Directory for rolling log files; file logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();
    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = match args.log_level.as_deref() {
            Some(level) => level,
            None => taskdeck_core::default_log_level(),
        };
        if let Err(err) = taskdeck_core::init_logging(level, log_dir) {
            eprintln!("warning: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        taskdeck_core::core_version()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut service = TaskService::new();
    run_menu(&mut service, &mut input);
    info!("event=cli_exit module=cli status=ok");
}

fn run_menu(service: &mut TaskService, input: &mut impl BufRead) {
    loop {
        println!("1. Add Task");
        println!("2. View Tasks");
        println!("3. Remove Task");
        println!("4. Undo Last Action");
        println!("5. Exit");

        let Some(choice) = prompt(input, "Choose (1-5): ") else {
            break;
        };
        match choice.as_str() {
            "1" => add_task(service, input),
            "2" => print_tasks(service),
            "3" => remove_task(service, input),
            "4" => undo_last(service),
            "5" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice.\n"),
        }
    }
}

/// Prints a prompt without a trailing newline and reads one trimmed line.
///
/// Returns `None` on end of input, which the menu treats as exit.
fn prompt(input: &mut impl BufRead, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn add_task(service: &mut TaskService, input: &mut impl BufRead) {
    let Some(name) = prompt(input, "Enter task name: ") else {
        return;
    };
    if name.is_empty() {
        println!("You entered nothing.\n");
        return;
    }

    let Some(priority) = prompt(input, "Enter priority (High/Medium/Low): ") else {
        return;
    };
    let Some(deadline) = prompt(input, "Enter deadline (YYYY-MM-DD) or leave blank: ") else {
        return;
    };
    let deadline = (!deadline.is_empty()).then_some(deadline);

    match service.add_task(&name, &priority, deadline.as_deref()) {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                match warning {
                    AddWarning::DeadlineIgnored { .. } => {
                        println!("Invalid date format. Deadline ignored.");
                    }
                }
            }
            println!(
                "Task added: {} (Priority: {})\n",
                outcome.task.name, outcome.task.priority
            );
        }
        Err(err) => println!("{err}\n"),
    }
}

fn print_tasks(service: &TaskService) {
    let rows = service.view_tasks();
    if rows.is_empty() {
        println!("No tasks yet.\n");
        return;
    }

    println!("\nYour tasks:");
    for row in &rows {
        println!(
            "{}. {} [Priority: {}, Deadline: {}]",
            row.position,
            row.task.name,
            row.task.priority,
            row.task.deadline_label()
        );
    }
    println!();
}

fn remove_task(service: &mut TaskService, input: &mut impl BufRead) {
    print_tasks(service);
    if service.task_count() == 0 {
        return;
    }

    let Some(number) = prompt(input, "Enter task number to remove: ") else {
        return;
    };
    let Ok(position) = number.parse::<usize>() else {
        println!("Please enter a valid number.\n");
        return;
    };

    match service.remove_task_at(position) {
        Ok(removed) => println!("Removed: {}\n", removed.name),
        Err(TaskServiceError::PositionOutOfRange { .. }) => {
            println!("Invalid task number.\n");
        }
        Err(err) => println!("{err}\n"),
    }
}

fn undo_last(service: &mut TaskService) {
    match service.undo_last() {
        Ok(UndoOutcome::NothingToUndo) => println!("No actions to undo.\n"),
        Ok(UndoOutcome::RemovedAdded(task)) => {
            println!("Undo: Removed task '{}' added previously.\n", task.name);
        }
        Ok(UndoOutcome::RestoredRemoved(task)) => {
            println!("Undo: Restored task '{}' removed previously.\n", task.name);
        }
        Err(err) => println!("{err}\n"),
    }
}
