//! Date-grid arithmetic for the month and week views.
//!
//! All functions are pure and work on local calendar dates. The week start is
//! passed in explicitly so month grids, week rows and view re-anchoring always
//! agree on where a week begins.

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

/// First day of the week used by every grid computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Days between the week start and `date`'s weekday (0..=6).
    fn offset_of(self, date: NaiveDate) -> i64 {
        let day = date.weekday().num_days_from_monday();
        let start = self.weekday().num_days_from_monday();
        ((day + 7 - start) % 7) as i64
    }
}

// Boundary helpers saturate at NaiveDate::MIN / NaiveDate::MAX instead of
// panicking, so grids near the edge of chrono's range are just truncated.

pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date.checked_sub_signed(Duration::days(week_start.offset_of(date)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    start_of_week(date, week_start)
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Every day shown by a month grid: from the start of the week holding the
/// 1st through the end of the week holding the last day of the month.
///
/// The result is contiguous and its length is a multiple of 7, except for
/// the first and last months chrono can represent.
pub fn month_grid(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let first = start_of_week(start_of_month(date), week_start);
    let last = end_of_week(end_of_month(date), week_start);
    days_between(first, last)
}

/// The 7 days of the week containing `date`.
pub fn week_days(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    days_between(start_of_week(date, week_start), end_of_week(date, week_start))
}

fn days_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// Time-of-day markers from 00:00 spaced `interval_minutes` apart over 24 hours.
///
/// The interval must be non-zero and divide 60 evenly.
pub fn time_slots(interval_minutes: u32) -> CalGridResult<Vec<NaiveTime>> {
    if interval_minutes == 0 || 60 % interval_minutes != 0 {
        return Err(CalGridError::InvalidSlotInterval(interval_minutes));
    }

    let slots = (0..24)
        .flat_map(|hour| {
            (0..60)
                .step_by(interval_minutes as usize)
                .filter_map(move |minute| NaiveTime::from_hms_opt(hour, minute, 0))
        })
        .collect();

    Ok(slots)
}

pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}

/// Whether `date` falls in the same month as the view anchor.
pub fn is_current_month(date: NaiveDate, anchor: NaiveDate) -> bool {
    date.year() == anchor.year() && date.month() == anchor.month()
}

pub fn is_same_date_time(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a == b
}
