//! Task ordering.
//!
//! Produces the order in which pending tasks are laid out:
//! - Base order: stable sort by weighted priority/difficulty score, highest first
//! - Optional interleaving of difficulty buckets (see [`interleave`])
//!
//! The result is always a permutation of the input; nothing is filtered here.
//! Callers pass only the tasks they want scheduled.

mod interleave;

pub use interleave::interleave_by_difficulty;

use crate::settings::SchedulingSettings;
use crate::task::Task;

/// Weighted ordering score of a task.
pub fn priority_score(task: &Task, settings: &SchedulingSettings) -> f64 {
    f64::from(task.priority) * settings.priority_weight
        + f64::from(task.difficulty) * settings.difficulty_weight
}

/// Base order: descending score. Ties keep their input order.
pub fn base_order(tasks: &[Task], settings: &SchedulingSettings) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // `sort_by` is stable, which keeps equal-score tasks in input order.
    sorted.sort_by(|a, b| {
        priority_score(b, settings).total_cmp(&priority_score(a, settings))
    });
    sorted
}

/// Order pending tasks for scheduling.
///
/// Applies [`base_order`], then [`interleave_by_difficulty`] when
/// `alternate_task_difficulty` is enabled.
pub fn order_tasks(pending: &[Task], settings: &SchedulingSettings) -> Vec<Task> {
    let sorted = base_order(pending, settings);

    if settings.alternate_task_difficulty {
        interleave_by_difficulty(sorted)
    } else {
        sorted
    }
}
