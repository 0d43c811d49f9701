//! Bucketing events into days and week-view slots.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::event::CalendarEvent;

/// Whether `event` should be listed on `day`.
///
/// An event shows on its start day and on every day through its end day, so
/// multi-day events appear on each covered day.
pub fn occurs_on(event: &CalendarEvent, day: NaiveDate) -> bool {
    let start = event.start.date();
    let end = event.end.date();
    start == day || (start <= day && day <= end)
}

/// Events listed on `day`, in input order.
pub fn events_on_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| occurs_on(e, day)).collect()
}

/// Events on `day` starting exactly at `slot`'s hour and minute.
///
/// Events starting between slot boundaries are not listed.
pub fn events_in_slot(
    events: &[CalendarEvent],
    day: NaiveDate,
    slot: NaiveTime,
) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|e| occurs_on(e, day))
        .filter(|e| e.start.hour() == slot.hour() && e.start.minute() == slot.minute())
        .collect()
}
