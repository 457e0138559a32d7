//! Task management commands for CLI.

use clap::Subcommand;
use uuid::Uuid;

use attune_core::Task;

use super::open_planner;
use crate::format::format_minutes;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Estimated minutes (5-180)
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(5..=180))]
        minutes: u32,
        /// Discipline key (e.g. general, mathematics, programming)
        #[arg(long, default_value = "general")]
        discipline: String,
        /// Difficulty (1-5)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
        difficulty: u8,
        /// Priority (1-5)
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=5))]
        priority: u8,
    },
    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long)]
        pending: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task ID
        id: String,
    },
    /// Remove all tasks and the current timeline
    Clear,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut planner) = open_planner()?;

    match action {
        TaskAction::Add {
            title,
            minutes,
            discipline,
            difficulty,
            priority,
        } => {
            let title = title.trim();
            if title.is_empty() {
                return Err("task title must not be empty".into());
            }
            let task = Task::new(Uuid::new_v4().to_string(), title, minutes, difficulty, priority)
                .with_discipline(discipline);
            planner.add_task(task.clone())?;
            store.save(&planner)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { pending, json } => {
            let tasks: Vec<&Task> = planner
                .tasks()
                .iter()
                .filter(|t| !pending || !t.completed)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks. Add one with `attune task add <title>`.");
            } else {
                for task in tasks {
                    println!(
                        "[{}] {}  {}  ({} • {} • difficulty {} • priority {})",
                        if task.completed { "x" } else { " " },
                        task.id,
                        task.title,
                        format_minutes(i64::from(task.estimated_minutes)),
                        task.discipline,
                        task.difficulty,
                        task.priority,
                    );
                }
            }
        }
        TaskAction::Remove { id } => {
            let task = planner.remove_task(&id)?;
            store.save(&planner)?;
            println!("Task removed: {} ({})", task.id, task.title);
        }
        TaskAction::Toggle { id } => {
            let completed = planner.toggle_task(&id)?;
            store.save(&planner)?;
            println!(
                "Task {id} marked {}",
                if completed { "completed" } else { "pending" }
            );
        }
        TaskAction::Clear => {
            planner.clear();
            store.save(&planner)?;
            println!("All tasks cleared");
        }
    }

    if !planner.is_timeline_current() && !planner.timeline().is_empty() {
        println!("note: the timeline is out of date; run `attune schedule generate`");
    }
    Ok(())
}
