//! Schedule input types: commitments, tasks, the horizon and its day window.
//!
//! These are the caller-owned records the engine reads. Times of day are
//! stored as `HH:MM` strings and validated when a run starts, so a bad
//! value is reported against the record that carries it.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::time::{self, AbsMinute, END_OF_DAY};

/// A fixed obligation that occupies time on one or more days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment {
    pub id: String,
    pub title: String,
    pub start_time: String, // HH:mm
    pub end_time: String,   // HH:mm
    /// First day of a date-ranged commitment. Absent for daily recurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive). Defaults to `start_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Commitment {
    /// A commitment repeated every day of the horizon.
    pub fn daily(id: &str, title: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            start_date: None,
            end_date: None,
        }
    }

    /// A commitment limited to the inclusive range `[start_date, end_date]`.
    pub fn dated(
        id: &str,
        title: &str,
        start_time: &str,
        end_time: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::daily(id, title, start_time, end_time)
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Parse times and normalize the date range.
    pub fn resolve(&self) -> Result<ResolvedCommitment, ValidationError> {
        let record = format!("commitment '{}'", self.id);
        let start = time::parse_hhmm(&self.start_time, &record)?;
        let end = time::parse_hhmm(&self.end_time, &record)?;

        let recurrence = match (self.start_date, self.end_date) {
            (None, None) => Recurrence::Daily,
            (Some(first), None) => Recurrence::Dated { first, last: first },
            (Some(first), Some(last)) if last >= first => Recurrence::Dated { first, last },
            (Some(first), Some(last)) => {
                return Err(ValidationError::InvalidDateRange {
                    commitment_id: self.id.clone(),
                    message: format!("end date {last} is before start date {first}"),
                })
            }
            (None, Some(_)) => {
                return Err(ValidationError::InvalidDateRange {
                    commitment_id: self.id.clone(),
                    message: "end date given without a start date".to_string(),
                })
            }
        };

        Ok(ResolvedCommitment {
            id: self.id.clone(),
            title: self.title.clone(),
            start,
            end,
            recurrence,
        })
    }
}

/// How a resolved commitment repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Daily,
    Dated { first: NaiveDate, last: NaiveDate },
}

/// A commitment with parsed minute-of-day times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommitment {
    pub id: String,
    pub title: String,
    pub start: u16,
    pub end: u16,
    pub recurrence: Recurrence,
}

impl ResolvedCommitment {
    /// Daily recurrence whose end is before its start.
    pub fn crosses_midnight(&self) -> bool {
        self.recurrence == Recurrence::Daily && self.start > self.end
    }
}

/// Urgency class of a task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Scheduled whenever any feasible slot exists.
    Must,
    /// Competes for leftover capacity by value.
    #[default]
    Want,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Want => "want",
        }
    }
}

fn default_value() -> u32 {
    1
}

/// A flexible, atomic unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub kind: TaskKind,
    /// Preference score. Only compared between `want` tasks.
    #[serde(default = "default_value")]
    pub value: u32,
    /// Latest allowed end, as local date-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
}

impl Task {
    pub fn must(id: &str, title: &str, duration_minutes: i64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            duration_minutes,
            kind: TaskKind::Must,
            value: default_value(),
            deadline: None,
        }
    }

    pub fn want(id: &str, title: &str, duration_minutes: i64, value: u32) -> Self {
        Self {
            kind: TaskKind::Want,
            value,
            ..Self::must(id, title, duration_minutes)
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline on the horizon's minute timeline.
    pub fn deadline_minute(&self, horizon_start: NaiveDate) -> Option<AbsMinute> {
        self.deadline
            .map(|at| time::datetime_to_absolute(horizon_start, at))
    }
}

/// Reject malformed task records before a run.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for task in tasks {
        if task.duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration {
                task_id: task.id.clone(),
                minutes: task.duration_minutes,
            });
        }
        if task.kind == TaskKind::Want && task.value == 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("task '{}' value", task.id),
                message: "want tasks need a value of at least 1".to_string(),
            });
        }
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

/// Consecutive calendar days being planned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Horizon {
    pub start: NaiveDate,
    pub days: u32,
}

impl Horizon {
    pub fn new(start: NaiveDate, days: i64) -> Result<Self, ValidationError> {
        if days <= 0 {
            return Err(ValidationError::EmptyHorizon { days });
        }
        let too_large = || ValidationError::InvalidValue {
            field: "horizon_days".to_string(),
            message: format!("{days} days from {start} runs past the last supported date"),
        };
        let days_u32 = u32::try_from(days).map_err(|_| too_large())?;
        start
            .checked_add_signed(Duration::days(days - 1))
            .ok_or_else(too_large)?;
        Ok(Self {
            start,
            days: days_u32,
        })
    }

    /// Re-check a horizon built without [`Horizon::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::new(self.start, self.days as i64).map(|_| ())
    }

    /// Dates of the horizon in order. Stops early at the calendar's end.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days as i64)
            .map_while(move |offset| self.start.checked_add_signed(Duration::days(offset)))
    }

    pub fn last_date(&self) -> NaiveDate {
        self.start
            .checked_add_signed(Duration::days(self.days.max(1) as i64 - 1))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// The planning band applied to every day, in minutes-of-day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayWindow {
    pub start: u16,
    pub end: u16,
}

impl DayWindow {
    /// 00:00–23:59, used when overnight scheduling is enabled.
    pub const FULL_DAY: DayWindow = DayWindow {
        start: 0,
        end: END_OF_DAY,
    };

    pub fn new(start: u16, end: u16) -> Result<Self, ValidationError> {
        if end <= start || end > END_OF_DAY {
            return Err(ValidationError::InvalidWindow {
                start: time::format_hhmm(start),
                end: time::format_hhmm(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let s = time::parse_hhmm(start, "day window start")?;
        let e = time::parse_hhmm(end, "day window end")?;
        Self::new(s, e)
    }

    /// Re-check a window built without [`DayWindow::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::new(self.start, self.end).map(|_| ())
    }

    pub fn len_minutes(&self) -> i64 {
        self.end as i64 - self.start as i64
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start: 8 * 60,
            end: 20 * 60,
        }
    }
}
