//! Free-interval detection.
//!
//! Sweeps each day's planning window once, emitting the gaps between busy
//! intervals. Days are closed independently: a gap never crosses midnight.

use serde::{Deserialize, Serialize};

use crate::time::AbsMinute;

/// Half-open span `[start, end)` on the absolute minute timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: AbsMinute,
    pub end: AbsMinute,
}

impl Interval {
    /// Returns `None` when `end <= start`.
    pub fn new(start: AbsMinute, end: AbsMinute) -> Option<Self> {
        if end <= start {
            return None;
        }
        Some(Self { start, end })
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.end - self.start
    }

    /// Check if this interval can hold a block of the given length
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection with `bounds`, or `None` if nothing is left.
    pub fn clip(&self, bounds: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(bounds.start), self.end.min(bounds.end))
    }
}

/// One day's planning window and its busy intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule<B> {
    pub window: Interval,
    /// Clipped to `window`, sorted by start.
    pub busy: Vec<B>,
}

/// Anything occupying a span of a day.
pub trait Busy {
    fn span(&self) -> Interval;
}

impl Busy for Interval {
    fn span(&self) -> Interval {
        *self
    }
}

/// Free intervals of a single day.
///
/// `busy` must already be clipped to `window` and sorted by start;
/// overlapping busy spans are fine.
pub fn free_intervals_for_day<B: Busy>(window: Interval, busy: &[B]) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = window.start;

    for span in busy.iter().map(Busy::span) {
        if span.start > cursor {
            free.extend(Interval::new(cursor, span.start));
        }
        cursor = cursor.max(span.end);
    }

    if cursor < window.end {
        free.extend(Interval::new(cursor, window.end));
    }

    free
}

/// Free intervals for the whole horizon, in chronological order.
pub fn free_intervals<B: Busy>(days: &[DaySchedule<B>]) -> Vec<Interval> {
    days.iter()
        .flat_map(|day| free_intervals_for_day(day.window, &day.busy))
        .collect()
}
