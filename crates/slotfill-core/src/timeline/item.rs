//! Placed items: the engine's output records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::TaskKind;
use crate::time::{self, AbsMinute};

use super::gap::Interval;

/// Type of placed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacedItemType {
    Fixed, // Commitment occurrence
    Task,  // Placed flexible task
}

impl PlacedItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Task => "task",
        }
    }
}

/// Which half of a daily overnight commitment an occurrence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// `[00:00, end_time]`, the tail of the previous night.
    AfterMidnight,
    /// `[start_time, 23:59]`.
    BeforeMidnight,
}

/// A commitment occurrence or a placed task on the absolute timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: String,
    pub title: String,
    pub start: AbsMinute,
    pub end: AbsMinute,
    #[serde(rename = "type")]
    pub item_type: PlacedItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
}

impl PlacedItem {
    pub fn fixed(id: &str, title: &str, span: Interval, segment: Option<Segment>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start: span.start,
            end: span.end,
            item_type: PlacedItemType::Fixed,
            kind: None,
            value: None,
            segment,
        }
    }

    pub fn task(id: &str, title: &str, span: Interval, kind: TaskKind, value: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start: span.start,
            end: span.end,
            item_type: PlacedItemType::Task,
            kind: Some(kind),
            value: Some(value),
            segment: None,
        }
    }

    pub fn span(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_task(&self) -> bool {
        self.item_type == PlacedItemType::Task
    }

    pub fn start_at(&self, horizon_start: NaiveDate) -> NaiveDateTime {
        time::absolute_to_datetime(horizon_start, self.start)
    }

    pub fn end_at(&self, horizon_start: NaiveDate) -> NaiveDateTime {
        time::absolute_to_datetime(horizon_start, self.end)
    }
}

impl fmt::Display for PlacedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}-{})",
            self.item_type.as_str(),
            self.title,
            self.start,
            self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_field_and_skips_empty_options() {
        let item = PlacedItem::fixed("c1", "Lunch", Interval::new(720, 780).unwrap(), None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "fixed");
        assert!(json.get("kind").is_none());
        assert!(json.get("segment").is_none());

        let task = PlacedItem::task("t1", "Write", Interval::new(0, 30).unwrap(), TaskKind::Must, 1);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "task");
        assert_eq!(json["kind"], "must");
    }

    #[test]
    fn converts_back_to_local_datetimes() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let item = PlacedItem::task(
            "t",
            "T",
            Interval::new(1440 + 600, 1440 + 645).unwrap(),
            TaskKind::Want,
            3,
        );
        assert_eq!(
            item.start_at(start),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap().and_hms_opt(10, 0, 0).unwrap()
        );
        assert_eq!(item.duration_minutes(), 45);
    }
}
