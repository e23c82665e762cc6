//! Commitment expansion.
//!
//! Turns declarative commitments into concrete busy intervals for every day
//! of the horizon, clipped to that day's planning window.

use chrono::NaiveDate;
use tracing::trace;

use crate::schedule::{Commitment, DayWindow, Horizon, Recurrence, ResolvedCommitment};
use crate::error::ValidationError;
use crate::time::{self, END_OF_DAY};
use crate::timeline::{Busy, DaySchedule, Interval, PlacedItem, Segment};

/// One occurrence of a commitment on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyInterval {
    pub commitment_id: String,
    pub title: String,
    pub span: Interval,
    pub segment: Option<Segment>,
}

impl Busy for BusyInterval {
    fn span(&self) -> Interval {
        self.span
    }
}

impl BusyInterval {
    pub fn to_placed(&self) -> PlacedItem {
        PlacedItem::fixed(&self.commitment_id, &self.title, self.span, self.segment)
    }
}

/// Expand every commitment over the horizon.
///
/// Returns one [`DaySchedule`] per horizon day, busy intervals sorted by
/// start. Occurrences that fall entirely outside the window are dropped.
pub fn expand_commitments(
    commitments: &[Commitment],
    horizon: &Horizon,
    window: &DayWindow,
) -> Result<Vec<DaySchedule<BusyInterval>>, ValidationError> {
    let resolved = commitments
        .iter()
        .map(Commitment::resolve)
        .collect::<Result<Vec<_>, _>>()?;

    let days = horizon
        .dates()
        .map(|date| {
            let window_span = day_window_span(horizon.start, date, window);
            let mut busy: Vec<BusyInterval> = resolved
                .iter()
                .flat_map(|c| occurrences_on(c, date))
                .filter_map(|(start, end, segment, c)| {
                    let raw = Interval::new(
                        time::to_absolute(horizon.start, date, start),
                        time::to_absolute(horizon.start, date, end),
                    )?;
                    let span = raw.clip(&window_span)?;
                    Some(BusyInterval {
                        commitment_id: c.id.clone(),
                        title: c.title.clone(),
                        span,
                        segment,
                    })
                })
                .collect();
            busy.sort_by_key(|b| (b.span.start, b.span.end));
            trace!(%date, busy = busy.len(), "expanded commitments");
            DaySchedule {
                window: window_span,
                busy,
            }
        })
        .collect();

    Ok(days)
}

/// Absolute span of `window` on `date`.
pub fn day_window_span(horizon_start: NaiveDate, date: NaiveDate, window: &DayWindow) -> Interval {
    Interval {
        start: time::to_absolute(horizon_start, date, window.start),
        end: time::to_absolute(horizon_start, date, window.end),
    }
}

/// Raw (minute-of-day) occurrences of `c` on `date`, before clipping.
fn occurrences_on(
    c: &ResolvedCommitment,
    date: NaiveDate,
) -> Vec<(u16, u16, Option<Segment>, &ResolvedCommitment)> {
    match c.recurrence {
        Recurrence::Dated { first, last } => {
            if date < first || date > last {
                return Vec::new();
            }
            let start = if date == first { c.start } else { 0 };
            let end = if date == last { c.end } else { END_OF_DAY };
            vec![(start, end, None, c)]
        }
        Recurrence::Daily if c.crosses_midnight() => vec![
            (0, c.end, Some(Segment::AfterMidnight), c),
            (c.start, END_OF_DAY, Some(Segment::BeforeMidnight), c),
        ],
        Recurrence::Daily => vec![(c.start, c.end, None, c)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn spans(day: &DaySchedule<BusyInterval>) -> Vec<(i64, i64)> {
        day.busy.iter().map(|b| (b.span.start, b.span.end)).collect()
    }

    #[test]
    fn daily_commitment_repeats_each_day() {
        let horizon = Horizon::new(d(16), 3).unwrap();
        let days = expand_commitments(
            &[Commitment::daily("lunch", "Lunch", "12:00", "13:00")],
            &horizon,
            &DayWindow::default(),
        )
        .unwrap();

        assert_eq!(days.len(), 3);
        for (i, day) in days.iter().enumerate() {
            let offset = i as i64 * 1440;
            assert_eq!(spans(day), vec![(offset + 720, offset + 780)]);
            assert_eq!(day.busy[0].title, "Lunch");
        }
    }

    #[test]
    fn overnight_daily_commitment_splits_in_two() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let days = expand_commitments(
            &[Commitment::daily("sleep", "Sleep", "23:00", "07:00")],
            &horizon,
            &DayWindow::FULL_DAY,
        )
        .unwrap();

        assert_eq!(spans(&days[0]), vec![(0, 420), (1380, 1439)]);
        assert_eq!(days[0].busy[0].segment, Some(Segment::AfterMidnight));
        assert_eq!(days[0].busy[1].segment, Some(Segment::BeforeMidnight));
    }

    #[test]
    fn overnight_segments_are_clipped_to_window() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let days = expand_commitments(
            &[Commitment::daily("sleep", "Sleep", "23:00", "07:00")],
            &horizon,
            &DayWindow::default(),
        )
        .unwrap();
        // 08:00-20:00 window: both segments fall outside.
        assert!(days[0].busy.is_empty());
    }

    #[test]
    fn dated_commitment_clips_first_and_last_day() {
        let horizon = Horizon::new(d(16), 4).unwrap();
        let trip = Commitment::dated("trip", "Trip", "18:00", "10:00", d(17), d(18));
        let days = expand_commitments(&[trip], &horizon, &DayWindow::FULL_DAY).unwrap();

        assert!(days[0].busy.is_empty());
        assert_eq!(spans(&days[1]), vec![(1440 + 1080, 1440 + 1439)]);
        assert_eq!(spans(&days[2]), vec![(2880, 2880 + 600)]);
        assert!(days[3].busy.is_empty());
    }

    #[test]
    fn dated_commitment_middle_days_are_fully_busy() {
        let horizon = Horizon::new(d(16), 3).unwrap();
        let c = Commitment::dated("conf", "Conference", "09:00", "17:00", d(16), d(18));
        let days = expand_commitments(&[c], &horizon, &DayWindow::default()).unwrap();

        assert_eq!(spans(&days[0]), vec![(540, 1200)]);
        assert_eq!(spans(&days[1]), vec![(1440 + 480, 1440 + 1200)]);
        assert_eq!(spans(&days[2]), vec![(2880 + 480, 2880 + 1020)]);
    }

    #[test]
    fn inverted_single_day_commitment_is_dropped() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let c = Commitment::dated("x", "X", "22:00", "02:00", d(16), d(16));
        let days = expand_commitments(&[c], &horizon, &DayWindow::FULL_DAY).unwrap();
        assert!(days[0].busy.is_empty());
    }

    #[test]
    fn zero_length_commitment_is_dropped() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let c = Commitment::daily("x", "X", "10:00", "10:00");
        let days = expand_commitments(&[c], &horizon, &DayWindow::default()).unwrap();
        assert!(days[0].busy.is_empty());
    }

    #[test]
    fn busy_intervals_sorted_by_start() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let days = expand_commitments(
            &[
                Commitment::daily("b", "B", "15:00", "16:00"),
                Commitment::daily("a", "A", "09:00", "10:00"),
            ],
            &horizon,
            &DayWindow::default(),
        )
        .unwrap();
        let ids: Vec<_> = days[0].busy.iter().map(|b| b.commitment_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn malformed_time_fails_naming_commitment() {
        let horizon = Horizon::new(d(16), 1).unwrap();
        let err = expand_commitments(
            &[Commitment::daily("gym", "Gym", "18:00", "late")],
            &horizon,
            &DayWindow::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("gym"));
    }
}
