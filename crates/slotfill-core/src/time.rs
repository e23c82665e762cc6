//! Wall-clock ⇄ absolute-minute conversions.
//!
//! Every engine computation works on a single integer timeline: minutes
//! counted from 00:00 of the horizon's first day. Dates are naive local
//! dates, so a run never observes a timezone shift.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ValidationError;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Last representable minute of a day (23:59).
pub const END_OF_DAY: u16 = 23 * 60 + 59;

/// Absolute minute index relative to 00:00 of the horizon start date.
pub type AbsMinute = i64;

/// Parse `HH:MM` into a minute-of-day in `0..=1439`.
///
/// `record` names the owning record so the error points at it.
pub fn parse_hhmm(value: &str, record: &str) -> Result<u16, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        record: record.to_string(),
        value: value.to_string(),
    };

    let (hh, mm) = value.trim().split_once(':').ok_or_else(invalid)?;
    if hh.is_empty() || mm.len() != 2 {
        return Err(invalid());
    }
    let hour: u16 = hh.parse().map_err(|_| invalid())?;
    let minute: u16 = mm.parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

/// Format a minute-of-day as `HH:MM`.
pub fn format_hhmm(minute_of_day: u16) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// (date, minute-of-day) → absolute minute.
pub fn to_absolute(horizon_start: NaiveDate, date: NaiveDate, minute_of_day: u16) -> AbsMinute {
    (date - horizon_start).num_days() * MINUTES_PER_DAY + minute_of_day as i64
}

/// Absolute minute → (date, minute-of-day). Inverse of [`to_absolute`].
pub fn from_absolute(horizon_start: NaiveDate, minute: AbsMinute) -> (NaiveDate, u16) {
    let days = minute.div_euclid(MINUTES_PER_DAY);
    let minute_of_day = minute.rem_euclid(MINUTES_PER_DAY) as u16;
    (horizon_start + Duration::days(days), minute_of_day)
}

/// Date-time → absolute minute. Seconds are truncated.
pub fn datetime_to_absolute(horizon_start: NaiveDate, at: NaiveDateTime) -> AbsMinute {
    let minute_of_day = (at.hour() * 60 + at.minute()) as u16;
    to_absolute(horizon_start, at.date(), minute_of_day)
}

/// Absolute minute → date-time.
pub fn absolute_to_datetime(horizon_start: NaiveDate, minute: AbsMinute) -> NaiveDateTime {
    let (date, minute_of_day) = from_absolute(horizon_start, minute);
    let time = NaiveTime::from_hms_opt(minute_of_day as u32 / 60, minute_of_day as u32 % 60, 0)
        .unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}
