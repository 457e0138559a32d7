//! Post-task break computation.
//!
//! The break grows linearly with task difficulty and with the relative
//! overrun of the task, and is capped by `max_break_duration`.

use crate::error::ValidationError;
use crate::settings::BreakSettings;
use crate::task::{Task, MAX_SCORE, MIN_SCORE};

/// Break length (seconds) before the first task is completed.
pub const INITIAL_BREAK_SECONDS: u32 = 5 * 60;

/// `1 + ((difficulty - 1) / 4) * difficulty_multiplier`
///
/// 1.0 for difficulty 1, `1 + difficulty_multiplier` for difficulty 5.
pub fn difficulty_factor(difficulty: u8, settings: &BreakSettings) -> f64 {
    let span = f64::from(MAX_SCORE - MIN_SCORE);
    1.0 + ((f64::from(difficulty) - f64::from(MIN_SCORE)) / span) * settings.difficulty_multiplier
}

/// `1` when on time, else `1 + (overrun / estimate) * overrun_multiplier`.
pub fn overrun_factor(estimated_minutes: u32, actual_minutes: u32, settings: &BreakSettings) -> f64 {
    if actual_minutes <= estimated_minutes {
        return 1.0;
    }
    let overrun = f64::from(actual_minutes - estimated_minutes);
    1.0 + (overrun / f64::from(estimated_minutes)) * settings.overrun_multiplier
}

/// Break duration in seconds after finishing `task` in `actual_minutes`.
///
/// Always within `0..=max_break_duration * 60`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTask`] if the task has a zero estimate.
pub fn compute_break(
    task: &Task,
    actual_minutes: u32,
    settings: &BreakSettings,
) -> Result<u32, ValidationError> {
    task.ensure_positive_estimate()?;

    let raw = (f64::from(settings.base_break_duration)
        * difficulty_factor(task.difficulty, settings)
        * overrun_factor(task.estimated_minutes, actual_minutes, settings)
        * 60.0)
        .round()
        .max(0.0) as u32;
    let cap = settings.max_break_duration.saturating_mul(60);

    let seconds = raw.min(cap);
    tracing::debug!(
        task_id = %task.id,
        actual_minutes,
        raw_seconds = raw,
        break_seconds = seconds,
        "computed break"
    );
    Ok(seconds)
}
