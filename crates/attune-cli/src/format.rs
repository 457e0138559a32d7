//! Human-readable rendering helpers.

use attune_core::{ScheduledSlot, SlotStatus};

/// `45 min`, `1h`, `1h 30m`.
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// `m:ss` countdown notation for a break length.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One timeline row: marker, time window, title and estimate.
pub fn format_slot(index: usize, slot: &ScheduledSlot, cursor: usize) -> String {
    let marker = match slot.status(index, cursor) {
        SlotStatus::Completed => "✓",
        SlotStatus::Active => "▶",
        SlotStatus::Pending => " ",
    };
    format!(
        "{} {:>2}. {}-{}  {}  [{} • {} • difficulty {} • priority {}]",
        marker,
        index + 1,
        slot.start_time.format("%H:%M"),
        slot.end_time.format("%H:%M"),
        slot.task.title,
        format_minutes(i64::from(slot.task.estimated_minutes)),
        slot.task.discipline,
        slot.task.difficulty,
        slot.task.priority,
    )
}
