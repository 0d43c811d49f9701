//! Fixed-format date and time labels used by the grids and the event form.

use chrono::{NaiveDate, NaiveTime};

/// Day of month without padding: "5".
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d").to_string()
}

/// Abbreviated weekday: "Mon".
pub fn format_weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Month header: "January 2024".
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// 24-hour clock: "09:30".
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn format_date_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time_input(time: NaiveTime) -> String {
    format_time(time)
}
