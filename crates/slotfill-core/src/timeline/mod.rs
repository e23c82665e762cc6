//! Timeline primitives.
//!
//! This module provides:
//! - Absolute-minute intervals and free-interval detection
//! - Placed items, the engine's output records

mod gap;
mod item;

pub use gap::{free_intervals, free_intervals_for_day, Busy, DaySchedule, Interval};
pub use item::{PlacedItem, PlacedItemType, Segment};
