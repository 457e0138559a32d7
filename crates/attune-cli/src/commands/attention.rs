//! Attention model commands.

use chrono::NaiveTime;
use clap::Subcommand;

use attune_core::attention::{attention_factor, hour_of_day, render_ascii_chart, AttentionBand};
use attune_core::BehaviorConfig;

#[derive(Subcommand)]
pub enum AttentionAction {
    /// Show the 24-hour attention curve
    Chart,
    /// Show the attention factor at a time of day
    At {
        /// Time of day (HH:MM)
        time: String,
    },
}

pub fn run(action: AttentionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = BehaviorConfig::load_or_default();

    match action {
        AttentionAction::Chart => {
            println!("{}", render_ascii_chart(&config.attention));
        }
        AttentionAction::At { time } => {
            let parsed = NaiveTime::parse_from_str(&time, "%H:%M")
                .map_err(|_| format!("Invalid time: '{time}'. Use HH:MM"))?;
            let hour = hour_of_day(&parsed);
            let band = AttentionBand::for_hour(hour);
            let factor = attention_factor(hour, &config.attention);
            println!("{time}  {}  {:.0}%", band.label(), factor * 100.0);
        }
    }
    Ok(())
}
