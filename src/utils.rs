//! Some utility functions

use crate::task::{Task, TaskStatus};

/// Shown instead of an empty task list
pub const EMPTY_LIST_MESSAGE: &str = "You don't have any tasks yet.";

/// A one-character summary of a status
pub fn status_glyph(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => " ",
        TaskStatus::InProgress => "~",
        TaskStatus::Completed => "✓",
        TaskStatus::Cancelled => "x",
    }
}

/// Format a task on a single line
pub fn format_task(task: &Task) -> String {
    format!("    {} {}\t@ {}\t{}\t[{}]\t{}",
        status_glyph(task.status()),
        task.title(),
        task.location(),
        task.date_time().format("%Y-%m-%d %H:%M"),
        task.status(),
        task.id(),
    )
}

/// A debug utility that pretty-prints a task
pub fn print_task(task: &Task) {
    println!("{}", format_task(task));
}

/// A debug utility that pretty-prints a task list
pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("    {}", EMPTY_LIST_MESSAGE);
        return;
    }
    for task in tasks {
        print_task(task);
    }
}
