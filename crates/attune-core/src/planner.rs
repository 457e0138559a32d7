//! Host-side planner state.
//!
//! The engine functions are stateless; this module is the state a host
//! threads through them: the task list, the current timeline with its
//! cursor, and the last computed break.
//!
//! Instead of a "schedule is stale" flag, every change to the task set or the
//! settings bumps a revision counter. A generated timeline remembers the
//! revision it was built from, and [`Planner::is_timeline_current`] compares
//! the two. Regenerating is always an explicit call.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::breaks::{compute_break, INITIAL_BREAK_SECONDS};
use crate::error::{CoreError, Result, ValidationError};
use crate::scheduler::order_tasks;
use crate::settings::BehaviorConfig;
use crate::task::Task;
use crate::timeline::{build_timeline, mark_completed, reschedule_after_overrun, ScheduledSlot};

/// Outcome of completing the active slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub task: Task,
    /// `actual - estimated`, negative when finished early
    pub overrun_minutes: i64,
    pub break_seconds: u32,
    /// Whether later slots were moved
    pub rescheduled: bool,
}

/// Task store plus the timeline being executed.
///
/// Settings are not serialized with the planner; they are owned by the
/// configuration file and handed in with [`Planner::with_settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planner {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    timeline: Vec<ScheduledSlot>,
    /// Index of the next slot not yet completed
    #[serde(default)]
    cursor: usize,
    #[serde(default = "default_break_seconds")]
    break_seconds: u32,
    #[serde(default)]
    last_completed: Option<Task>,
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    timeline_revision: Option<u64>,
    #[serde(skip)]
    settings: BehaviorConfig,
}

fn default_break_seconds() -> u32 {
    INITIAL_BREAK_SECONDS
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            timeline: Vec::new(),
            cursor: 0,
            break_seconds: INITIAL_BREAK_SECONDS,
            last_completed: None,
            revision: 0,
            timeline_revision: None,
            settings: BehaviorConfig::default(),
        }
    }
}

impl Planner {
    /// Create an empty planner with the given settings.
    pub fn new(settings: BehaviorConfig) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Attach settings without invalidating the timeline.
    ///
    /// Used when restoring a persisted planner whose settings live elsewhere.
    pub fn with_settings(mut self, settings: BehaviorConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks not yet completed, in insertion order.
    pub fn pending_tasks(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| !t.completed).cloned().collect()
    }

    pub fn timeline(&self) -> &[ScheduledSlot] {
        &self.timeline
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Most recently computed break, in seconds.
    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    pub fn last_completed(&self) -> Option<&Task> {
        self.last_completed.as_ref()
    }

    pub fn settings(&self) -> &BehaviorConfig {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when a timeline exists and nothing changed since it was generated.
    pub fn is_timeline_current(&self) -> bool {
        self.timeline_revision == Some(self.revision)
    }

    /// True once every slot of a non-empty timeline has been completed.
    pub fn is_finished(&self) -> bool {
        !self.timeline.is_empty() && self.cursor >= self.timeline.len()
    }

    /// The slot being worked on, if any.
    pub fn current_slot(&self) -> Option<&ScheduledSlot> {
        self.timeline.get(self.cursor)
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
    }

    /// Add a task to the store.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the task is invalid or its id is taken.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        task.validate()?;
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(ValidationError::InvalidTask {
                id: task.id,
                message: "a task with this id already exists".to_string(),
            }
            .into());
        }
        tracing::info!(task_id = %task.id, title = %task.title, "task added");
        self.tasks.push(task);
        self.bump_revision();
        Ok(())
    }

    /// Remove a task by id and return it.
    pub fn remove_task(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(index);
        tracing::info!(task_id = %id, "task removed");
        self.bump_revision();
        Ok(task)
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        task.completed = !task.completed;
        let completed = task.completed;
        tracing::info!(task_id = %id, completed, "task completion toggled");
        self.bump_revision();
        Ok(completed)
    }

    /// Drop every task and the timeline.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.timeline.clear();
        self.cursor = 0;
        self.timeline_revision = None;
        self.last_completed = None;
        tracing::info!("planner cleared");
        self.bump_revision();
    }

    /// Replace the settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the current settings in place, if
    /// any value is out of range.
    pub fn update_settings(&mut self, settings: BehaviorConfig) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        self.bump_revision();
        Ok(())
    }

    /// Restore default settings.
    pub fn reset_settings(&mut self) {
        self.settings = BehaviorConfig::default();
        self.bump_revision();
    }

    /// Order pending tasks and lay them out from `now`.
    ///
    /// The cursor returns to the first slot. With no pending tasks the
    /// timeline is empty, which is not an error.
    pub fn generate_timeline(&mut self, now: DateTime<FixedOffset>) -> Result<&[ScheduledSlot]> {
        let pending = self.pending_tasks();
        let ordered = order_tasks(&pending, &self.settings.scheduling);
        let timeline = build_timeline(&ordered, &self.settings, now)?;

        tracing::info!(
            slots = timeline.len(),
            revision = self.revision,
            "timeline generated"
        );

        self.timeline = timeline;
        self.cursor = 0;
        self.timeline_revision = Some(self.revision);
        Ok(&self.timeline)
    }

    /// Complete the active slot after `actual_minutes` of work.
    ///
    /// Marks the slot and its task completed, computes the following break,
    /// shifts later slots by any overrun and advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTask`] when no slot is left.
    pub fn complete_current(&mut self, actual_minutes: u32) -> Result<Completion> {
        let index = self.cursor;
        let task = self
            .timeline
            .get(index)
            .map(|slot| slot.task.clone())
            .ok_or(CoreError::NoActiveTask)?;

        let break_seconds = compute_break(&task, actual_minutes, &self.settings.breaks)?;
        let overrun_minutes = i64::from(actual_minutes) - i64::from(task.estimated_minutes);

        let completed = mark_completed(&self.timeline, index)?;
        let rescheduled = reschedule_after_overrun(
            &completed,
            index,
            overrun_minutes,
            &self.settings.scheduling,
        )?;
        let moved = rescheduled != completed;

        if let Some(stored) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            stored.completed = true;
        }

        let mut finished = task;
        finished.completed = true;

        self.timeline = rescheduled;
        self.cursor = index + 1;
        self.break_seconds = break_seconds;
        self.last_completed = Some(finished.clone());

        tracing::info!(
            task_id = %finished.id,
            actual_minutes,
            overrun_minutes,
            break_seconds,
            rescheduled = moved,
            "task completed"
        );

        Ok(Completion {
            task: finished,
            overrun_minutes,
            break_seconds,
            rescheduled: moved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 6, hour, minute, 0)
            .unwrap()
    }

    fn planner_with_scenario() -> Planner {
        let mut planner = Planner::new(BehaviorConfig::default());
        planner.add_task(Task::new("A", "Proofs", 30, 5, 5)).unwrap();
        planner.add_task(Task::new("B", "Email", 10, 1, 1)).unwrap();
        planner.add_task(Task::new("C", "Reading", 20, 3, 3)).unwrap();
        planner
    }

    #[test]
    fn add_rejects_invalid_and_duplicate_tasks() {
        let mut planner = planner_with_scenario();
        assert!(planner.add_task(Task::new("Z", "Zero", 0, 3, 3)).is_err());
        assert!(planner.add_task(Task::new("A", "Again", 10, 3, 3)).is_err());
        assert_eq!(planner.tasks().len(), 3);
    }

    #[test]
    fn generate_orders_and_lays_out_pending_tasks() {
        let mut planner = planner_with_scenario();
        let timeline = planner.generate_timeline(at(12, 0)).unwrap();
        let ids: Vec<&str> = timeline.iter().map(|s| s.task.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(planner.is_timeline_current());
        assert_eq!(planner.current_slot().unwrap().task.id, "A");
    }

    #[test]
    fn completed_tasks_are_not_scheduled() {
        let mut planner = planner_with_scenario();
        planner.toggle_task("B").unwrap();
        planner.generate_timeline(at(12, 0)).unwrap();
        assert_eq!(planner.timeline().len(), 2);
    }

    #[test]
    fn mutations_invalidate_timeline() {
        let mut planner = planner_with_scenario();
        assert!(!planner.is_timeline_current());
        planner.generate_timeline(at(12, 0)).unwrap();
        assert!(planner.is_timeline_current());

        planner.add_task(Task::new("D", "Extra", 15, 2, 2)).unwrap();
        assert!(!planner.is_timeline_current());

        planner.generate_timeline(at(12, 0)).unwrap();
        planner.reset_settings();
        assert!(!planner.is_timeline_current());

        planner.generate_timeline(at(12, 0)).unwrap();
        planner.remove_task("D").unwrap();
        assert!(!planner.is_timeline_current());
    }

    #[test]
    fn update_settings_validates() {
        let mut planner = planner_with_scenario();
        let mut bad = BehaviorConfig::default();
        bad.attention.morning_peak = 20;
        assert!(planner.update_settings(bad).is_err());
        assert_eq!(planner.settings().attention.morning_peak, 85);
    }

    #[test]
    fn complete_current_with_overrun() {
        let mut planner = planner_with_scenario();
        planner.generate_timeline(at(12, 0)).unwrap();
        let before = planner.timeline().to_vec();

        let completion = planner.complete_current(45).unwrap();
        assert_eq!(completion.task.id, "A");
        assert_eq!(completion.overrun_minutes, 15);
        assert_eq!(completion.break_seconds, 825);
        assert!(completion.rescheduled);

        let after = planner.timeline();
        assert!(after[0].completed);
        assert_eq!(after[0].start_time, before[0].start_time);
        assert_eq!(after[1].start_time, before[1].start_time + Duration::minutes(15));
        assert_eq!(after[2].end_time, before[2].end_time + Duration::minutes(15));

        assert_eq!(planner.cursor(), 1);
        assert_eq!(planner.break_seconds(), 825);
        assert_eq!(planner.last_completed().unwrap().id, "A");
        assert!(planner.tasks().iter().find(|t| t.id == "A").unwrap().completed);
        // Completion does not invalidate the timeline it came from.
        assert!(planner.is_timeline_current());
    }

    #[test]
    fn complete_early_does_not_shift() {
        let mut planner = planner_with_scenario();
        planner.generate_timeline(at(12, 0)).unwrap();
        let before = planner.timeline().to_vec();
        let completion = planner.complete_current(20).unwrap();
        assert!(!completion.rescheduled);
        assert_eq!(planner.timeline()[1], before[1]);
    }

    #[test]
    fn completing_past_the_end_fails() {
        let mut planner = planner_with_scenario();
        planner.generate_timeline(at(12, 0)).unwrap();
        for _ in 0..3 {
            planner.complete_current(10).unwrap();
        }
        assert!(planner.is_finished());
        assert!(planner.current_slot().is_none());
        assert!(matches!(
            planner.complete_current(10),
            Err(CoreError::NoActiveTask)
        ));
    }

    #[test]
    fn empty_store_generates_empty_timeline() {
        let mut planner = Planner::default();
        assert!(planner.generate_timeline(at(9, 0)).unwrap().is_empty());
        assert!(!planner.is_finished());
        assert!(matches!(planner.complete_current(5), Err(CoreError::NoActiveTask)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut planner = planner_with_scenario();
        planner.generate_timeline(at(12, 0)).unwrap();
        planner.clear();
        assert!(planner.tasks().is_empty());
        assert!(planner.timeline().is_empty());
        assert_eq!(planner.cursor(), 0);
        assert!(!planner.is_timeline_current());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut planner = planner_with_scenario();
        assert!(matches!(planner.remove_task("nope"), Err(CoreError::TaskNotFound(_))));
        assert!(matches!(planner.toggle_task("nope"), Err(CoreError::TaskNotFound(_))));
    }

    #[test]
    fn serde_roundtrip_skips_settings() {
        let mut planner = planner_with_scenario();
        planner.generate_timeline(at(12, 0)).unwrap();
        let json = serde_json::to_string(&planner).unwrap();
        assert!(!json.contains("morning_peak"));
        let restored: Planner = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.timeline(), planner.timeline());
        assert!(restored.is_timeline_current());
        assert_eq!(restored.break_seconds(), INITIAL_BREAK_SECONDS);
    }
}
