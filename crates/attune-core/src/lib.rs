//! # Attune Core Library
//!
//! Attention-aware scheduling for a personal task list. Given tasks with an
//! estimate, difficulty and priority, the engine orders them, lays them out
//! on a timeline stretched by a time-of-day attention model, sizes the break
//! after each task and shifts the remaining timeline when a task overruns.
//!
//! ## Architecture
//!
//! - **Engine** (pure, no I/O, no state between calls):
//!   [`attention`], [`scheduler`], [`timeline`], [`breaks`]
//! - **Host** (state a front end threads through the engine):
//!   [`planner`] for the task store and cursor, [`storage`] for TOML settings
//!   and the JSON state file
//!
//! ## Key Components
//!
//! - [`order_tasks`]: weighted ordering with optional difficulty interleaving
//! - [`build_timeline`]: attention-adjusted slots with fixed gaps
//! - [`compute_break`]: difficulty and overrun scaled break length
//! - [`reschedule_after_overrun`]: shift not-yet-started slots
//! - [`Planner`]: task store plus the timeline being executed

pub mod attention;
pub mod breaks;
pub mod error;
pub mod planner;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod task;
pub mod timeline;

pub use attention::{attention_factor, AttentionBand};
pub use breaks::compute_break;
pub use error::{ConfigError, CoreError, ValidationError};
pub use planner::{Completion, Planner};
pub use scheduler::order_tasks;
pub use settings::{AttentionSettings, BehaviorConfig, BreakSettings, SchedulingSettings};
pub use storage::StateStore;
pub use task::{DifficultyBand, Task};
pub use timeline::{build_timeline, reschedule_after_overrun, ScheduledSlot, SlotStatus};
