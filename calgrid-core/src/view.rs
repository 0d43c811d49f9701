//! View state: visible period, selection and the event modal.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::CalendarEvent;
use crate::format::format_month_year;
use crate::grid::{WeekStart, month_grid, start_of_month, start_of_week, week_days};

/// Granularity of the visible period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarView::Month => write!(f, "month"),
            CalendarView::Week => write!(f, "week"),
        }
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarView::Month),
            "week" => Ok(CalendarView::Week),
            other => Err(format!("Unknown view '{}'. Expected 'month' or 'week'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// Snapshot of what the widget is showing.
///
/// Closing the modal always clears both selections, and edit mode always
/// carries the event being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_date: NaiveDateTime,
    pub view: CalendarView,
    pub selected_date: Option<NaiveDateTime>,
    pub selected_event: Option<CalendarEvent>,
    pub is_modal_open: bool,
    pub modal_mode: ModalMode,
}

pub struct ViewController {
    state: ViewState,
    week_start: WeekStart,
}

impl ViewController {
    pub fn new(initial_date: NaiveDateTime, view: CalendarView, week_start: WeekStart) -> Self {
        ViewController {
            state: ViewState {
                current_date: initial_date,
                view,
                selected_date: None,
                selected_event: None,
                is_modal_open: false,
                modal_mode: ModalMode::Create,
            },
            week_start,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    // NAVIGATION:

    pub fn go_to_next_period(&mut self) {
        self.shift_period(true);
    }

    pub fn go_to_previous_period(&mut self) {
        self.shift_period(false);
    }

    /// Move one month or one week. Month steps clamp the day to the target
    /// month's length (Jan 31 -> Feb 29).
    fn shift_period(&mut self, forward: bool) {
        let current = self.state.current_date;
        let shifted = match (self.state.view, forward) {
            (CalendarView::Month, true) => current.checked_add_months(Months::new(1)),
            (CalendarView::Month, false) => current.checked_sub_months(Months::new(1)),
            (CalendarView::Week, true) => current.checked_add_signed(Duration::weeks(1)),
            (CalendarView::Week, false) => current.checked_sub_signed(Duration::weeks(1)),
        };

        // Out of chrono's range: stay put
        self.state.current_date = shifted.unwrap_or(current);
        trace!(current_date = %self.state.current_date, "shifted period");
    }

    pub fn go_to_today(&mut self) {
        self.go_to_date(Local::now().naive_local());
    }

    /// Anchor the visible period on `date`. View and selection are kept.
    pub fn go_to_date(&mut self, date: NaiveDateTime) {
        self.state.current_date = date;
        trace!(current_date = %date, "jumped to date");
    }

    /// Switch granularity and re-anchor to the start of the new period.
    pub fn set_view(&mut self, view: CalendarView) {
        let date = self.state.current_date.date();
        let anchor = match view {
            CalendarView::Week => start_of_week(date, self.week_start),
            CalendarView::Month => start_of_month(date),
        };

        self.state.view = view;
        self.state.current_date = anchor.and_time(NaiveTime::MIN);
        trace!(%view, current_date = %self.state.current_date, "changed view");
    }

    // MODAL:

    pub fn open_create_modal(&mut self, date: NaiveDateTime) {
        self.state.selected_date = Some(date);
        self.state.selected_event = None;
        self.state.modal_mode = ModalMode::Create;
        self.state.is_modal_open = true;
    }

    pub fn open_edit_modal(&mut self, event: CalendarEvent) {
        self.state.selected_date = Some(event.start);
        self.state.selected_event = Some(event);
        self.state.modal_mode = ModalMode::Edit;
        self.state.is_modal_open = true;
    }

    /// Close the modal and drop back to create mode, so edit mode never
    /// outlives its selected event.
    pub fn close_modal(&mut self) {
        self.state.is_modal_open = false;
        self.state.selected_date = None;
        self.state.selected_event = None;
        self.state.modal_mode = ModalMode::Create;
    }

    // DERIVED:

    /// Days rendered for the current period.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        let date = self.state.current_date.date();
        match self.state.view {
            CalendarView::Month => month_grid(date, self.week_start),
            CalendarView::Week => week_days(date, self.week_start),
        }
    }

    /// Header for the current period, e.g. "January 2024".
    pub fn period_title(&self) -> String {
        format_month_year(self.state.current_date.date())
    }
}
