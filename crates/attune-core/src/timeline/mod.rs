//! Timeline construction.
//!
//! Lays ordered tasks out back to back starting at the next quarter hour.
//! Each task's estimate is stretched by the attention factor at its start
//! time and by its difficulty, and consecutive slots are separated by a fixed
//! gap. Slots are produced in input order and never overlap.

mod reschedule;

pub use reschedule::reschedule_after_overrun;

use chrono::{DateTime, Duration, FixedOffset, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::attention::{attention_factor, hour_of_day};
use crate::error::ValidationError;
use crate::settings::{AttentionSettings, BehaviorConfig};
use crate::task::{Task, NEUTRAL_DIFFICULTY};

/// Gap left between two consecutive slots (minutes).
pub const INTER_TASK_GAP_MINUTES: i64 = 5;

/// Start times are aligned to this many minutes.
pub const START_ALIGNMENT_MINUTES: i64 = 15;

/// Duration change per difficulty point away from neutral.
const DIFFICULTY_STEP: f64 = 0.1;

/// One task's reserved window in a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    /// Snapshot of the task at scheduling time
    pub task: Task,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub completed: bool,
}

impl ScheduledSlot {
    /// Create a pending slot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] unless `end_time > start_time`.
    pub fn new(
        task: Task,
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
    ) -> Result<Self, ValidationError> {
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            task,
            start_time,
            end_time,
            completed: false,
        })
    }

    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Lifecycle state of the slot at `index` given the host's cursor.
    pub fn status(&self, index: usize, cursor: usize) -> SlotStatus {
        if self.completed {
            SlotStatus::Completed
        } else if index == cursor {
            SlotStatus::Active
        } else {
            SlotStatus::Pending
        }
    }
}

/// Lifecycle of a slot: `Pending -> Active -> Completed`.
///
/// `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Pending,
    Active,
    Completed,
}

/// Round up to the next quarter hour.
///
/// Only the minute count is rounded; seconds and sub-seconds are then
/// dropped, so 10:00:40 becomes 10:00 and 10:52 becomes 11:00.
pub fn round_up_to_quarter_hour(at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let minute = i64::from(at.minute());
    let rounded = (minute + START_ALIGNMENT_MINUTES - 1) / START_ALIGNMENT_MINUTES
        * START_ALIGNMENT_MINUTES;
    let truncated = at
        - Duration::seconds(i64::from(at.second()))
        - Duration::nanoseconds(i64::from(at.nanosecond()));
    truncated + Duration::minutes(rounded - minute)
}

/// Minutes reserved for `task` when it starts at `start`.
///
/// `ceil((estimate / attention) * (1 + (difficulty - 3) * 0.1))`
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTask`] for a zero estimate and
/// [`ValidationError::InvalidValue`] when the attention factor at `start` is
/// not positive.
pub fn adjusted_duration_minutes(
    task: &Task,
    start: &DateTime<FixedOffset>,
    attention: &AttentionSettings,
) -> Result<i64, ValidationError> {
    task.ensure_positive_estimate()?;
    let factor = attention_factor(hour_of_day(start), attention);
    if factor <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "attention".to_string(),
            message: format!("attention factor at {} must be positive", start.format("%H:%M")),
        });
    }
    let difficulty_offset = f64::from(task.difficulty) - f64::from(NEUTRAL_DIFFICULTY);
    let minutes =
        (f64::from(task.estimated_minutes) / factor) * (1.0 + difficulty_offset * DIFFICULTY_STEP);
    Ok(minutes.ceil() as i64)
}

/// `at + minutes`, or an error naming `field` when the result is not representable.
pub(crate) fn offset_by_minutes(
    at: DateTime<FixedOffset>,
    minutes: i64,
    field: &str,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or_else(|| ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{minutes} minutes from {at} is out of range"),
        })
}

/// Build a timeline for `ordered` tasks starting at the quarter hour after `now`.
///
/// An empty input yields an empty timeline.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTask`] if any task has a zero estimate.
/// Tasks are checked before any slot is laid out. A non-positive attention
/// factor or a slot ending outside the representable date range yields
/// [`ValidationError::InvalidValue`].
pub fn build_timeline(
    ordered: &[Task],
    config: &BehaviorConfig,
    now: DateTime<FixedOffset>,
) -> Result<Vec<ScheduledSlot>, ValidationError> {
    for task in ordered {
        task.ensure_positive_estimate()?;
    }

    let mut cursor = round_up_to_quarter_hour(now);
    let mut slots = Vec::with_capacity(ordered.len());

    for task in ordered {
        let minutes = adjusted_duration_minutes(task, &cursor, &config.attention)?;
        let end_time = offset_by_minutes(cursor, minutes, "timeline")?;

        tracing::debug!(
            task_id = %task.id,
            start = %cursor,
            adjusted_minutes = minutes,
            estimated_minutes = task.estimated_minutes,
            "laid out slot"
        );

        slots.push(ScheduledSlot::new(task.clone(), cursor, end_time)?);
        cursor = offset_by_minutes(end_time, INTER_TASK_GAP_MINUTES, "timeline")?;
    }

    Ok(slots)
}

/// Copy of `timeline` with the slot at `index` marked completed.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfBounds`] if `index >= timeline.len()`.
pub fn mark_completed(
    timeline: &[ScheduledSlot],
    index: usize,
) -> Result<Vec<ScheduledSlot>, ValidationError> {
    if index >= timeline.len() {
        return Err(ValidationError::timeline_index(index, timeline.len()));
    }
    let mut updated = timeline.to_vec();
    updated[index].completed = true;
    updated[index].task.completed = true;
    Ok(updated)
}

/// Minutes from the first start to the last end, 0 for an empty timeline.
pub fn total_span_minutes(timeline: &[ScheduledSlot]) -> i64 {
    match (timeline.first(), timeline.last()) {
        (Some(first), Some(last)) => (last.end_time - first.start_time).num_minutes(),
        _ => 0,
    }
}
