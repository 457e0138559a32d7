use chrono::Local;
use clap::Subcommand;

use attune_core::timeline::total_span_minutes;
use attune_core::Planner;

use super::open_planner;
use crate::format::{format_countdown, format_minutes, format_slot};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Order pending tasks and lay them out from now
    Generate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current timeline
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the slot being worked on
    Current,
    /// Complete the current slot
    Complete {
        /// Minutes actually spent on the task
        actual_minutes: u32,
    },
    /// Show the most recently computed break
    Break,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut planner) = open_planner()?;

    match action {
        ScheduleAction::Generate { json } => {
            planner.generate_timeline(Local::now().fixed_offset())?;
            store.save(&planner)?;
            if json {
                println!("{}", serde_json::to_string_pretty(planner.timeline())?);
            } else if planner.timeline().is_empty() {
                println!("Nothing to schedule: add tasks with `attune task add <title>`.");
            } else {
                print_timeline(&planner);
            }
        }
        ScheduleAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(planner.timeline())?);
            } else if planner.timeline().is_empty() {
                println!("No timeline yet. Run `attune schedule generate`.");
            } else {
                print_timeline(&planner);
                if !planner.is_timeline_current() {
                    println!("note: tasks or settings changed since this timeline was generated");
                }
            }
        }
        ScheduleAction::Current => match planner.current_slot() {
            Some(slot) => println!("{}", format_slot(planner.cursor(), slot, planner.cursor())),
            None if planner.is_finished() => println!("All scheduled tasks are completed."),
            None => println!("No active task. Run `attune schedule generate`."),
        },
        ScheduleAction::Complete { actual_minutes } => {
            let completion = planner.complete_current(actual_minutes)?;
            store.save(&planner)?;

            println!("Completed: {}", completion.task.title);
            if completion.overrun_minutes > 0 {
                println!(
                    "Overran the estimate by {}",
                    format_minutes(completion.overrun_minutes)
                );
            }
            if completion.rescheduled {
                println!(
                    "Remaining tasks moved {} later",
                    format_minutes(completion.overrun_minutes)
                );
            }
            println!("Take a break: {}", format_countdown(completion.break_seconds));
            match planner.current_slot() {
                Some(next) => println!(
                    "Next: {} at {}",
                    next.task.title,
                    next.start_time.format("%H:%M")
                ),
                None => println!("That was the last task on the timeline."),
            }
        }
        ScheduleAction::Break => {
            match planner.last_completed() {
                Some(task) => println!(
                    "Break after '{}': {}",
                    task.title,
                    format_countdown(planner.break_seconds())
                ),
                None => println!("Default break: {}", format_countdown(planner.break_seconds())),
            }
        }
    }
    Ok(())
}

fn print_timeline(planner: &Planner) {
    let timeline = planner.timeline();
    for (index, slot) in timeline.iter().enumerate() {
        println!("{}", format_slot(index, slot, planner.cursor()));
    }
    println!(
        "\n{} tasks • {} total",
        timeline.len(),
        format_minutes(total_span_minutes(timeline))
    );
}
