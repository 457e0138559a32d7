//! Overrun adaptation.
//!
//! When a task takes longer than estimated, every slot after it moves later
//! by the overrun. Slots are shifted as-is: attention factors are not
//! re-evaluated at the new start times, so a shifted slot keeps the duration
//! it was built with even if it now falls in a different attention band.

use super::{offset_by_minutes, ScheduledSlot};
use crate::error::ValidationError;
use crate::settings::SchedulingSettings;

/// Shift the slots after `completed_index` by `overrun_minutes`.
///
/// Returns an unchanged copy when adaptive scheduling is off, the overrun is
/// not positive, or `completed_index` is the last slot.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfBounds`] if `completed_index >= timeline.len()`,
/// and [`ValidationError::InvalidValue`] if the shift moves a slot outside the
/// representable date range.
pub fn reschedule_after_overrun(
    timeline: &[ScheduledSlot],
    completed_index: usize,
    overrun_minutes: i64,
    settings: &SchedulingSettings,
) -> Result<Vec<ScheduledSlot>, ValidationError> {
    if completed_index >= timeline.len() {
        return Err(ValidationError::timeline_index(
            completed_index,
            timeline.len(),
        ));
    }

    let mut updated = timeline.to_vec();
    if !settings.adaptive_scheduling
        || overrun_minutes <= 0
        || completed_index + 1 == timeline.len()
    {
        return Ok(updated);
    }

    for slot in updated.iter_mut().skip(completed_index + 1) {
        slot.start_time = offset_by_minutes(slot.start_time, overrun_minutes, "overrun_minutes")?;
        slot.end_time = offset_by_minutes(slot.end_time, overrun_minutes, "overrun_minutes")?;
    }

    tracing::debug!(
        completed_index,
        overrun_minutes,
        shifted = timeline.len() - completed_index - 1,
        "shifted remaining slots after overrun"
    );

    Ok(updated)
}
