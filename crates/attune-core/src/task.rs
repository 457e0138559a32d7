//! Task type shared by the engine and the host planner.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Lowest allowed difficulty/priority score.
pub const MIN_SCORE: u8 = 1;
/// Highest allowed difficulty/priority score.
pub const MAX_SCORE: u8 = 5;
/// Difficulty considered neutral by the duration adjustment.
pub const NEUTRAL_DIFFICULTY: u8 = 3;

/// Discipline assigned when the user does not pick one.
pub const DEFAULT_DISCIPLINE: &str = "general";

/// A unit of work the user wants scheduled.
///
/// `discipline` is an open, string-keyed category. Mapping keys to display
/// names is left to whoever renders the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub estimated_minutes: u32,
    #[serde(default = "default_discipline")]
    pub discipline: String,
    pub difficulty: u8,
    pub priority: u8,
    #[serde(default)]
    pub completed: bool,
}

fn default_discipline() -> String {
    DEFAULT_DISCIPLINE.to_string()
}

impl Task {
    /// Create a pending task with the default discipline.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        estimated_minutes: u32,
        difficulty: u8,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimated_minutes,
            discipline: default_discipline(),
            difficulty,
            priority,
            completed: false,
        }
    }

    /// Builder: set the discipline key.
    pub fn with_discipline(mut self, discipline: impl Into<String>) -> Self {
        self.discipline = discipline.into();
        self
    }

    /// Check the data invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTask`] when the estimate is zero or a
    /// score falls outside 1..=5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.estimated_minutes == 0 {
            return Err(self.invalid("estimated_minutes must be greater than 0"));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.difficulty) {
            return Err(self.invalid(&format!(
                "difficulty {} is outside {MIN_SCORE}..={MAX_SCORE}",
                self.difficulty
            )));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.priority) {
            return Err(self.invalid(&format!(
                "priority {} is outside {MIN_SCORE}..={MAX_SCORE}",
                self.priority
            )));
        }
        Ok(())
    }

    /// Reject tasks whose estimate would divide by zero.
    pub(crate) fn ensure_positive_estimate(&self) -> Result<(), ValidationError> {
        if self.estimated_minutes == 0 {
            Err(self.invalid("estimated_minutes must be greater than 0"))
        } else {
            Ok(())
        }
    }

    /// Difficulty bucket used by the interleaving policy.
    pub fn difficulty_band(&self) -> DifficultyBand {
        DifficultyBand::from_difficulty(self.difficulty)
    }

    fn invalid(&self, message: &str) -> ValidationError {
        ValidationError::InvalidTask {
            id: self.id.clone(),
            message: message.to_string(),
        }
    }
}

/// Coarse difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    /// Difficulty 1 or 2
    Low,
    /// Difficulty 3
    Medium,
    /// Difficulty 4 or 5
    High,
}

impl DifficultyBand {
    pub fn from_difficulty(difficulty: u8) -> Self {
        match difficulty {
            0..=2 => DifficultyBand::Low,
            3 => DifficultyBand::Medium,
            _ => DifficultyBand::High,
        }
    }
}

impl fmt::Display for DifficultyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyBand::Low => "low",
            DifficultyBand::Medium => "medium",
            DifficultyBand::High => "high",
        };
        f.write_str(name)
    }
}
