//! Task management commands for CLI.

use clap::Subcommand;
use slotfill_core::{PlanStore, Task, TaskKind};

use super::{parse_datetime, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a flexible task
    Add {
        /// Task title
        title: String,
        /// Duration in minutes
        #[arg(long)]
        minutes: i64,
        /// Schedule ahead of every want task
        #[arg(long)]
        must: bool,
        /// Preference score for want tasks (default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        value: u32,
        /// Latest end (YYYY-MM-DDTHH:MM)
        #[arg(long, value_parser = parse_datetime)]
        deadline: Option<chrono::NaiveDateTime>,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let store = PlanStore::open_default()?;

    match action {
        TaskAction::Add {
            title,
            minutes,
            must,
            value,
            deadline,
            id,
        } => {
            let task = Task {
                id: id.unwrap_or_default(),
                title,
                duration_minutes: minutes,
                kind: if must { TaskKind::Must } else { TaskKind::Want },
                value,
                deadline,
            };
            let task = store.add_task(task)?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List { json } => {
            let plan = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan.tasks)?);
            } else {
                for t in &plan.tasks {
                    let deadline = t
                        .deadline
                        .map(|d| format!("  due {}", d.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default();
                    println!(
                        "{}  {}m {} v{}{}  {}",
                        t.id,
                        t.duration_minutes,
                        t.kind.as_str(),
                        t.value,
                        deadline,
                        t.title
                    );
                }
            }
        }
        TaskAction::Remove { id } => {
            if store.remove_task(&id)? {
                println!("Task removed: {id}");
            } else {
                return Err(format!("Task not found: {id}").into());
            }
        }
    }
    Ok(())
}
