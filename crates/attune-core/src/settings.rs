//! Behavioral model settings.
//!
//! Three independently tunable groups:
//! - Attention: attention level (percent) during three named day segments
//! - Scheduling: ordering weights and the adaptive/interleaving switches
//! - Breaks: inputs to the post-task break formula
//!
//! Every engine function takes these by reference and never mutates them.
//! Loading and saving lives in [`crate::storage`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Attention level per day segment, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionSettings {
    /// 08:00-11:00, 50-100
    #[serde(default = "default_morning_peak")]
    pub morning_peak: u32,
    /// 13:00-15:00, 30-90
    #[serde(default = "default_afternoon_dip")]
    pub afternoon_dip: u32,
    /// 17:00-20:00, 40-95
    #[serde(default = "default_evening_recovery")]
    pub evening_recovery: u32,
}

/// Task ordering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingSettings {
    #[serde(default = "default_difficulty_weight")]
    pub difficulty_weight: f64,
    #[serde(default = "default_priority_weight")]
    pub priority_weight: f64,
    /// Shift remaining slots when a task overruns its estimate.
    #[serde(default = "default_true")]
    pub adaptive_scheduling: bool,
    /// Interleave hard tasks with easier ones.
    #[serde(default = "default_true")]
    pub alternate_task_difficulty: bool,
}

/// Break computation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakSettings {
    /// Minutes, 1-15
    #[serde(default = "default_base_break_duration")]
    pub base_break_duration: u32,
    /// 0.5-2.0
    #[serde(default = "default_difficulty_multiplier")]
    pub difficulty_multiplier: f64,
    /// 0.1-1.0
    #[serde(default = "default_overrun_multiplier")]
    pub overrun_multiplier: f64,
    /// Minutes, 5-30
    #[serde(default = "default_max_break_duration")]
    pub max_break_duration: u32,
}

/// Full behavioral model.
///
/// Serialized to/from TOML with one table per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub attention: AttentionSettings,
    #[serde(default)]
    pub scheduling: SchedulingSettings,
    #[serde(default)]
    pub breaks: BreakSettings,
}

// Default functions
fn default_morning_peak() -> u32 {
    85
}
fn default_afternoon_dip() -> u32 {
    60
}
fn default_evening_recovery() -> u32 {
    75
}
fn default_difficulty_weight() -> f64 {
    1.2
}
fn default_priority_weight() -> f64 {
    1.5
}
fn default_true() -> bool {
    true
}
fn default_base_break_duration() -> u32 {
    5
}
fn default_difficulty_multiplier() -> f64 {
    1.2
}
fn default_overrun_multiplier() -> f64 {
    0.5
}
fn default_max_break_duration() -> u32 {
    15
}

impl Default for AttentionSettings {
    fn default() -> Self {
        Self {
            morning_peak: default_morning_peak(),
            afternoon_dip: default_afternoon_dip(),
            evening_recovery: default_evening_recovery(),
        }
    }
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            difficulty_weight: default_difficulty_weight(),
            priority_weight: default_priority_weight(),
            adaptive_scheduling: true,
            alternate_task_difficulty: true,
        }
    }
}

impl Default for BreakSettings {
    fn default() -> Self {
        Self {
            base_break_duration: default_base_break_duration(),
            difficulty_multiplier: default_difficulty_multiplier(),
            overrun_multiplier: default_overrun_multiplier(),
            max_break_duration: default_max_break_duration(),
        }
    }
}

fn check_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    // Written so that NaN fails the check.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{value} is outside {min}..={max}"),
        })
    }
}

impl AttentionSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("attention.morning_peak", self.morning_peak, 50, 100)?;
        check_range("attention.afternoon_dip", self.afternoon_dip, 30, 90)?;
        check_range("attention.evening_recovery", self.evening_recovery, 40, 95)?;
        Ok(())
    }
}

impl SchedulingSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("scheduling.difficulty_weight", self.difficulty_weight, 0.5, 2.0)?;
        check_range("scheduling.priority_weight", self.priority_weight, 0.5, 2.0)?;
        Ok(())
    }
}

impl BreakSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("breaks.base_break_duration", self.base_break_duration, 1, 15)?;
        check_range(
            "breaks.difficulty_multiplier",
            self.difficulty_multiplier,
            0.5,
            2.0,
        )?;
        check_range("breaks.overrun_multiplier", self.overrun_multiplier, 0.1, 1.0)?;
        check_range("breaks.max_break_duration", self.max_break_duration, 5, 30)?;
        Ok(())
    }
}

impl BehaviorConfig {
    /// Check every group against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] naming the first field found
    /// out of range, as a dot-separated key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.attention.validate()?;
        self.scheduling.validate()?;
        self.breaks.validate()?;
        Ok(())
    }
}
