//! Scheduler commands for CLI.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use slotfill_core::time::{format_hhmm, from_absolute};
use slotfill_core::{Allocation, AutoScheduler, Config, DayWindow, Horizon, Plan, PlanStore, SchedulerConfig};
use std::path::PathBuf;

use super::{parse_date, CmdResult};

#[derive(Args)]
pub struct RunOptions {
    /// First day of the horizon (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Number of days to plan (default: planner.horizon_days)
    #[arg(long)]
    days: Option<i64>,
    /// Plan across the whole day instead of the configured band
    #[arg(long)]
    overnight: bool,
    /// Read commitments and tasks from this JSON file instead of the store
    #[arg(long)]
    plan: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Place tasks into free time and print the timeline
    Run(RunOptions),
    /// Print the free intervals left by commitments
    Free(RunOptions),
}

struct Prepared {
    plan: Plan,
    horizon: Horizon,
    scheduler: AutoScheduler,
}

fn prepare(opts: &RunOptions) -> Result<Prepared, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let window = if opts.overnight {
        DayWindow::FULL_DAY
    } else {
        config.day_window()?
    };

    let plan = match &opts.plan {
        Some(path) => PlanStore::open(path.clone()).load()?,
        None => PlanStore::open_default()?.load()?,
    };

    let start = opts
        .from
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let days = opts.days.unwrap_or(config.planner.horizon_days as i64);
    let horizon = Horizon::new(start, days)?;
    tracing::debug!(%start, days, ?window, "prepared schedule run");

    Ok(Prepared {
        plan,
        horizon,
        scheduler: AutoScheduler::with_config(SchedulerConfig { window }),
    })
}

pub fn run(action: ScheduleAction) -> CmdResult {
    match action {
        ScheduleAction::Run(opts) => {
            let p = prepare(&opts)?;
            let allocation = p
                .scheduler
                .allocate(&p.plan.commitments, &p.plan.tasks, &p.horizon)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&allocation)?);
            } else {
                print_allocation(&allocation);
            }
        }
        ScheduleAction::Free(opts) => {
            let p = prepare(&opts)?;
            let free = p.scheduler.free_intervals(&p.plan.commitments, &p.horizon)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&free)?);
            } else {
                let mut current: Option<NaiveDate> = None;
                for interval in &free {
                    let (date, start) = from_absolute(p.horizon.start, interval.start);
                    let (_, end) = from_absolute(p.horizon.start, interval.end);
                    if current != Some(date) {
                        println!("{date}");
                        current = Some(date);
                    }
                    println!(
                        "  {}–{}  {}m",
                        format_hhmm(start),
                        format_hhmm(end),
                        interval.duration_minutes()
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_allocation(allocation: &Allocation) {
    let mut current: Option<NaiveDate> = None;
    for item in &allocation.items {
        let start = allocation.to_datetime(item.start);
        let end = allocation.to_datetime(item.end);
        if current != Some(start.date()) {
            println!("{}", start.date());
            current = Some(start.date());
        }
        let tag = match item.kind {
            Some(kind) => kind.as_str(),
            None => item.item_type.as_str(),
        };
        println!(
            "  {}–{}  [{}] {}",
            start.format("%H:%M"),
            end.format("%H:%M"),
            tag,
            item.title
        );
    }
    if !allocation.unplaced.is_empty() {
        println!("Unplaced: {}", allocation.unplaced.join(", "));
    }
}
