//! Automatic scheduler for flexible tasks.
//!
//! This module drives one allocation run over a horizon:
//! - Expands commitments into per-day busy intervals
//! - Detects the free intervals left in each day's planning window
//! - Packs the unplaced task pool into each free interval in turn
//! - Assembles commitment occurrences and placed tasks into one timeline
//!
//! Packing is greedy across intervals and optimal within one interval: a
//! task placed early is never reconsidered for a better combination later.

mod expand;
mod packer;

pub use expand::{day_window_span, expand_commitments, BusyInterval};
pub use packer::{pack_interval, Placement};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::schedule::{validate_tasks, Commitment, DayWindow, Horizon, Task};
use crate::time::{self, AbsMinute};
use crate::timeline::{free_intervals, Interval, PlacedItem};

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Planning band applied to every day
    pub window: DayWindow,
}

impl SchedulerConfig {
    /// Full-day window, for overnight scheduling.
    pub fn overnight() -> Self {
        Self {
            window: DayWindow::FULL_DAY,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window: DayWindow::default(),
        }
    }
}

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub horizon: Horizon,
    pub window: DayWindow,
    /// Commitment occurrences and placed tasks, sorted by start.
    pub items: Vec<PlacedItem>,
    /// Free intervals before any task was placed.
    pub free_intervals: Vec<Interval>,
    /// Ids of tasks that fit nowhere, in input order.
    pub unplaced: Vec<String>,
}

impl Allocation {
    pub fn placed_tasks(&self) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(|item| item.is_task())
    }

    pub fn to_datetime(&self, minute: AbsMinute) -> NaiveDateTime {
        time::absolute_to_datetime(self.horizon.start, minute)
    }
}

/// Automatic scheduler for flexible tasks
pub struct AutoScheduler {
    config: SchedulerConfig,
}

impl AutoScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Compute only the free intervals of the horizon.
    pub fn free_intervals(
        &self,
        commitments: &[Commitment],
        horizon: &Horizon,
    ) -> Result<Vec<Interval>, ValidationError> {
        self.check_bounds(horizon)?;
        let days = expand_commitments(commitments, horizon, &self.config.window)?;
        Ok(free_intervals(&days))
    }

    // Horizon and window fields are public, so literals skip their constructors.
    fn check_bounds(&self, horizon: &Horizon) -> Result<(), ValidationError> {
        horizon.validate()?;
        self.config.window.validate()
    }

    /// Run the full allocation.
    ///
    /// # Arguments
    /// * `commitments` - Fixed obligations to block out
    /// * `tasks` - Pool of flexible tasks, read-only
    /// * `horizon` - Days to plan
    ///
    /// # Errors
    /// Fails only on malformed input; tasks that fit nowhere are listed in
    /// [`Allocation::unplaced`].
    pub fn allocate(
        &self,
        commitments: &[Commitment],
        tasks: &[Task],
        horizon: &Horizon,
    ) -> Result<Allocation, ValidationError> {
        validate_tasks(tasks)?;
        self.check_bounds(horizon)?;

        let days = expand_commitments(commitments, horizon, &self.config.window)?;
        let free = free_intervals(&days);

        let mut items: Vec<PlacedItem> = days
            .iter()
            .flat_map(|day| day.busy.iter().map(BusyInterval::to_placed))
            .collect();

        let deadlines: Vec<Option<AbsMinute>> = tasks
            .iter()
            .map(|t| t.deadline_minute(horizon.start))
            .collect();

        // Indices into `tasks` still waiting for a slot.
        let mut remaining: Vec<usize> = (0..tasks.len()).collect();

        for interval in &free {
            if remaining.is_empty() {
                break;
            }
            let pool: Vec<&Task> = remaining.iter().map(|&i| &tasks[i]).collect();
            let pool_deadlines: Vec<Option<AbsMinute>> =
                remaining.iter().map(|&i| deadlines[i]).collect();

            let placements = pack_interval(*interval, &pool, &pool_deadlines);
            debug!(
                start = interval.start,
                capacity = interval.duration_minutes(),
                pool = pool.len(),
                placed = placements.len(),
                "packed free interval"
            );
            if placements.is_empty() {
                continue;
            }

            let mut placed_indices = Vec::with_capacity(placements.len());
            for placement in &placements {
                let task = pool[placement.pool_index];
                items.push(PlacedItem::task(
                    &task.id,
                    &task.title,
                    placement.span,
                    task.kind,
                    task.value,
                ));
                placed_indices.push(remaining[placement.pool_index]);
            }
            remaining.retain(|i| !placed_indices.contains(i));
        }

        items.sort_by_key(|item| (item.start, item.end));

        let unplaced: Vec<String> = remaining.iter().map(|&i| tasks[i].id.clone()).collect();
        info!(
            days = horizon.days,
            free_intervals = free.len(),
            placed = tasks.len() - unplaced.len(),
            unplaced = unplaced.len(),
            "allocation complete"
        );

        Ok(Allocation {
            horizon: *horizon,
            window: self.config.window,
            items,
            free_intervals: free,
            unplaced,
        })
    }

    /// Convenience wrapper returning only the sorted placed items.
    pub fn allocate_items(
        &self,
        commitments: &[Commitment],
        tasks: &[Task],
        horizon: &Horizon,
    ) -> Result<Vec<PlacedItem>, ValidationError> {
        Ok(self.allocate(commitments, tasks, horizon)?.items)
    }
}

impl Default for AutoScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot allocation with an explicit horizon and window.
pub fn allocate(
    commitments: &[Commitment],
    tasks: &[Task],
    horizon_start: NaiveDate,
    horizon_days: i64,
    window: DayWindow,
) -> Result<Vec<PlacedItem>, ValidationError> {
    let horizon = Horizon::new(horizon_start, horizon_days)?;
    AutoScheduler::with_config(SchedulerConfig { window }).allocate_items(commitments, tasks, &horizon)
}
