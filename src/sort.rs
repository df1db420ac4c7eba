//! Ordering of task lists, as displayed to the user

use crate::task::Task;

/// How a task list should be ordered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest tasks first (by creation date)
    Date,
    /// Pending first, then In Progress, Completed and Cancelled
    Status,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Date
    }
}

impl SortOrder {
    /// Returns the other sort order. This is what a "sort by" toggle button does
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Date => SortOrder::Status,
            SortOrder::Status => SortOrder::Date,
        }
    }
}

/// Sort tasks in place. Tasks that compare equal keep their relative order
pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    match order {
        SortOrder::Date => tasks.sort_by(|a, b| b.created_at().cmp(a.created_at())),
        SortOrder::Status => tasks.sort_by_key(|task| task.status().priority()),
    }
}

/// Returns a sorted copy of `tasks`
pub fn sorted(tasks: &[Task], order: SortOrder) -> Vec<Task> {
    let mut result = tasks.to_vec();
    sort_tasks(&mut result, order);
    result
}
