//! # Slotfill Core Library
//!
//! This library places flexible tasks into the free time left between fixed
//! commitments across a multi-day horizon. The CLI binary is a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Time**: conversions between (date, time-of-day) and a single
//!   absolute-minute timeline
//! - **Scheduler**: commitment expansion, per-interval knapsack packing and
//!   the horizon driver
//! - **Timeline**: intervals, free-interval detection and placed items
//! - **Storage**: TOML configuration and JSON plan persistence
//!
//! ## Key Components
//!
//! - [`AutoScheduler`]: Runs one allocation over a horizon
//! - [`Allocation`]: Placed items, free intervals and unplaced tasks
//! - [`Config`]: Application configuration management
//! - [`PlanStore`]: Commitment and task persistence

pub mod time;
pub mod storage;
pub mod timeline;
pub mod schedule;
pub mod scheduler;
pub mod error;

pub use storage::{Config, Plan, PlanStore};
pub use timeline::{Interval, PlacedItem, PlacedItemType, Segment};
pub use schedule::{Commitment, DayWindow, Horizon, Task, TaskKind};
pub use scheduler::{allocate, Allocation, AutoScheduler, SchedulerConfig};
pub use error::{ConfigError, CoreError, ValidationError};
