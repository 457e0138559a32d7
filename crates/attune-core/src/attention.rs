//! Time-of-day attention model.
//!
//! Maps a fractional hour of day to a multiplier in (0, 1]. Lower attention
//! means a lower effective work rate, so the timeline builder divides task
//! estimates by this factor.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::settings::AttentionSettings;

/// Fixed factor for late night and early morning hours.
pub const LATE_NIGHT_FACTOR: f64 = 0.7;

/// Named segment of the day with its own attention level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionBand {
    /// [8, 11)
    MorningPeak,
    /// [13, 15)
    AfternoonDip,
    /// [17, 20)
    EveningRecovery,
    /// [22, 24) and [0, 6)
    LateNight,
    /// Everything else
    Baseline,
}

impl AttentionBand {
    /// Band containing `hour_of_day`. Bands are half-open.
    pub fn for_hour(hour_of_day: f64) -> Self {
        if (8.0..11.0).contains(&hour_of_day) {
            AttentionBand::MorningPeak
        } else if (13.0..15.0).contains(&hour_of_day) {
            AttentionBand::AfternoonDip
        } else if (17.0..20.0).contains(&hour_of_day) {
            AttentionBand::EveningRecovery
        } else if hour_of_day < 6.0 || hour_of_day >= 22.0 {
            AttentionBand::LateNight
        } else {
            AttentionBand::Baseline
        }
    }

    /// Multiplier this band contributes under `settings`.
    pub fn factor(&self, settings: &AttentionSettings) -> f64 {
        match self {
            AttentionBand::MorningPeak => f64::from(settings.morning_peak) / 100.0,
            AttentionBand::AfternoonDip => f64::from(settings.afternoon_dip) / 100.0,
            AttentionBand::EveningRecovery => f64::from(settings.evening_recovery) / 100.0,
            AttentionBand::LateNight => LATE_NIGHT_FACTOR,
            AttentionBand::Baseline => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttentionBand::MorningPeak => "morning peak",
            AttentionBand::AfternoonDip => "afternoon dip",
            AttentionBand::EveningRecovery => "evening recovery",
            AttentionBand::LateNight => "late night",
            AttentionBand::Baseline => "baseline",
        }
    }
}

/// Attention multiplier for a fractional hour in [0, 24).
pub fn attention_factor(hour_of_day: f64, settings: &AttentionSettings) -> f64 {
    AttentionBand::for_hour(hour_of_day).factor(settings)
}

/// Hours plus minutes/60, read in the value's own offset.
pub fn hour_of_day<T: Timelike>(at: &T) -> f64 {
    f64::from(at.hour()) + f64::from(at.minute()) / 60.0
}

/// Render the 24-hour attention curve as an ASCII bar chart.
pub fn render_ascii_chart(settings: &AttentionSettings) -> String {
    let mut output = String::from("\nAttention Curve:\n");
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for hour in 0..24u8 {
        let band = AttentionBand::for_hour(f64::from(hour));
        let factor = band.factor(settings);
        let bar_length = ((factor * 30.0) as usize).min(30);
        let bar = "█".repeat(bar_length);
        let empty = " ".repeat(30 - bar_length);

        output.push_str(&format!(
            "{:02}:00 {}{} {:>3.0}%  {}\n",
            hour,
            bar,
            empty,
            factor * 100.0,
            band.label()
        ));
    }

    output.push_str(&"─".repeat(50));
    output.push('\n');
    output
}
