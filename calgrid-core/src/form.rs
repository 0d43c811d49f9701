//! The create/edit event form.
//!
//! Fields are kept as the text a user typed so the form can round-trip
//! half-finished input. Parsing happens on submit.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CalGridError, CalGridResult};
use crate::event::{CalendarEvent, DEFAULT_EVENT_COLOR, EventDraft, EventUpdate, NewEvent};
use crate::format::{format_date_input, format_time_input};
use crate::validation::{DATES_REQUIRED, validate};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Length of a freshly created event.
const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD
    pub start_date: String,
    /// HH:MM
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub color: String,
    pub category: String,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            title: String::new(),
            description: String::new(),
            start_date: String::new(),
            start_time: String::new(),
            end_date: String::new(),
            end_time: String::new(),
            color: DEFAULT_EVENT_COLOR.to_string(),
            category: String::new(),
        }
    }
}

impl EventForm {
    /// Form pre-filled for editing `event`.
    pub fn for_event(event: &CalendarEvent) -> Self {
        let mut form = EventForm {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            color: event.display_color().to_string(),
            category: event.category.clone().unwrap_or_default(),
            ..Default::default()
        };
        form.set_start(event.start);
        form.set_end(event.end);
        form
    }

    /// Empty form starting at `date`, one hour long. At the very end of the
    /// date range the end equals the start and fails validation on submit.
    pub fn for_date(date: NaiveDateTime) -> Self {
        let mut form = EventForm::default();
        form.set_start(date);
        let end = date
            .checked_add_signed(Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES))
            .unwrap_or(date);
        form.set_end(end);
        form
    }

    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.start_date = format_date_input(start.date());
        self.start_time = format_time_input(start.time());
    }

    pub fn set_end(&mut self, end: NaiveDateTime) {
        self.end_date = format_date_input(end.date());
        self.end_time = format_time_input(end.time());
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_input(&self.start_date, &self.start_time)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        parse_input(&self.end_date, &self.end_time)
    }

    /// Parse and validate the form into a create payload.
    pub fn to_new_event(&self) -> CalGridResult<NewEvent> {
        let draft = EventDraft {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            start: self.start(),
            end: self.end(),
        };

        let errors = validate(&draft);
        if !errors.is_empty() {
            return Err(CalGridError::ValidationFailed(errors));
        }

        let (Some(start), Some(end)) = (draft.start, draft.end) else {
            return Err(CalGridError::ValidationFailed(vec![DATES_REQUIRED.to_string()]));
        };

        Ok(NewEvent {
            title: self.title.trim().to_string(),
            description: optional(self.description.trim()),
            start,
            end,
            color: optional(self.color.trim()),
            category: optional(self.category.trim()),
        })
    }

    /// Parse and validate the form into an edit payload that sets every field.
    ///
    /// Blank optional fields become empty strings, which clear the stored value.
    pub fn to_update(&self) -> CalGridResult<EventUpdate> {
        let new = self.to_new_event()?;
        Ok(EventUpdate {
            title: Some(new.title),
            description: Some(new.description.unwrap_or_default()),
            start: Some(new.start),
            end: Some(new.end),
            color: Some(new.color.unwrap_or_default()),
            category: Some(new.category.unwrap_or_default()),
        })
    }
}

fn parse_input(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_INPUT_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_INPUT_FORMAT).ok()?;
    Some(date.and_time(time))
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
