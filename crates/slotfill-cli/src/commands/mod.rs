pub mod commitment;
pub mod config;
pub mod schedule;
pub mod task;

use chrono::{NaiveDate, NaiveDateTime};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Parse `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Parse `YYYY-MM-DDTHH:MM` (seconds optional, space separator accepted).
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("invalid date-time '{value}', expected YYYY-MM-DDTHH:MM"))
}
