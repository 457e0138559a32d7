//! Difficulty interleaving.
//!
//! Splits an ordered task list into high (4-5), medium (3) and low (1-2)
//! buckets and deals them out round-robin so that demanding tasks are
//! followed by lighter ones. Each bucket keeps its incoming order.

use std::collections::VecDeque;

use crate::task::{DifficultyBand, Task};

/// Interleave `sorted` by difficulty bucket.
///
/// With at least one high task, each round takes one task from high, then
/// low, then medium. Without high tasks, each round takes medium then low.
/// Exhausted buckets are skipped.
pub fn interleave_by_difficulty(sorted: Vec<Task>) -> Vec<Task> {
    let total = sorted.len();
    let mut high = VecDeque::new();
    let mut medium = VecDeque::new();
    let mut low = VecDeque::new();

    for task in sorted {
        match task.difficulty_band() {
            DifficultyBand::High => high.push_back(task),
            DifficultyBand::Medium => medium.push_back(task),
            DifficultyBand::Low => low.push_back(task),
        }
    }

    tracing::debug!(
        high = high.len(),
        medium = medium.len(),
        low = low.len(),
        "interleaving tasks by difficulty"
    );

    let mut rotation = if high.is_empty() {
        vec![medium, low]
    } else {
        vec![high, low, medium]
    };

    let mut interleaved = Vec::with_capacity(total);
    while interleaved.len() < total {
        for bucket in rotation.iter_mut() {
            if let Some(task) = bucket.pop_front() {
                interleaved.push(task);
            }
        }
    }
    interleaved
}
