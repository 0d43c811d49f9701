//! The calendar widget: event store and view controller wired together.
//!
//! This is the surface a host drives. Clicks open the modal, submitting the
//! modal adds or updates depending on its mode, and deleting from the modal
//! removes the selected event.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{CalGridError, CalGridResult};
use crate::event::CalendarEvent;
use crate::filter;
use crate::form::EventForm;
use crate::grid::WeekStart;
use crate::store::{EventObserver, EventStore};
use crate::view::{CalendarView, ModalMode, ViewController, ViewState};

pub struct Calendar {
    store: EventStore,
    view: ViewController,
}

impl Calendar {
    pub fn new(
        initial_events: Vec<CalendarEvent>,
        initial_view: CalendarView,
        initial_date: NaiveDateTime,
        observer: impl EventObserver + 'static,
        week_start: WeekStart,
    ) -> Self {
        Calendar {
            store: EventStore::new(initial_events, observer),
            view: ViewController::new(initial_date, initial_view, week_start),
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.store.events()
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Navigation and modal transitions.
    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.view.visible_days()
    }

    pub fn events_on_day(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        filter::events_on_day(self.store.events(), day)
    }

    pub fn events_in_slot(&self, day: NaiveDate, slot: NaiveTime) -> Vec<&CalendarEvent> {
        filter::events_in_slot(self.store.events(), day, slot)
    }

    // USER INTENTS:

    /// A day cell or time slot was clicked.
    pub fn click_date(&mut self, date: NaiveDateTime) {
        self.view.open_create_modal(date);
    }

    /// An event was clicked. Unknown ids are ignored.
    pub fn click_event(&mut self, id: &str) {
        if let Some(event) = self.store.get(id) {
            self.view.open_edit_modal(event.clone());
        }
    }

    /// The form to show for the open modal, if any.
    pub fn modal_form(&self) -> Option<EventForm> {
        let state = self.view.state();
        if !state.is_modal_open {
            return None;
        }

        match (&state.modal_mode, &state.selected_event, state.selected_date) {
            (ModalMode::Edit, Some(event), _) => Some(EventForm::for_event(event)),
            (_, _, Some(date)) => Some(EventForm::for_date(date)),
            _ => Some(EventForm::default()),
        }
    }

    /// Submit the modal form. On success the modal closes and the stored
    /// event is returned; on failure the modal stays open.
    pub fn submit(&mut self, form: &EventForm) -> CalGridResult<CalendarEvent> {
        let state = self.view.state();
        if !state.is_modal_open {
            return Err(CalGridError::ModalClosed);
        }

        let saved = match (state.modal_mode, &state.selected_event) {
            (ModalMode::Create, _) => self.store.add(form.to_new_event()?)?,
            (ModalMode::Edit, Some(selected)) => {
                let id = selected.id.clone();
                self.store
                    .update(&id, form.to_update()?)?
                    .ok_or(CalGridError::EventNotFound(id))?
            }
            (ModalMode::Edit, None) => return Err(CalGridError::ModalClosed),
        };

        debug!(id = %saved.id, "submitted event form");
        self.view.close_modal();
        Ok(saved)
    }

    /// Delete the event being edited and close the modal.
    pub fn delete_selected(&mut self) -> bool {
        let state = self.view.state();
        let id = match (state.is_modal_open, state.modal_mode, &state.selected_event) {
            (true, ModalMode::Edit, Some(event)) => event.id.clone(),
            _ => return false,
        };

        let removed = self.store.delete(&id);
        self.view.close_modal();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NewEvent;
    use crate::validation::TITLE_REQUIRED;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn seeded() -> CalendarEvent {
        CalendarEvent {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            description: Some("Daily".to_string()),
            start: at(15, 9),
            end: at(15, 10),
            color: None,
            category: None,
        }
    }

    #[derive(Clone, Default)]
    struct Log {
        entries: Rc<RefCell<Vec<String>>>,
    }

    impl EventObserver for Log {
        fn on_add(&mut self, event: &NewEvent) {
            self.entries.borrow_mut().push(format!("add {}", event.title));
        }

        fn on_update(&mut self, id: &str, _update: &crate::event::EventUpdate) {
            self.entries.borrow_mut().push(format!("update {}", id));
        }

        fn on_delete(&mut self, id: &str) {
            self.entries.borrow_mut().push(format!("delete {}", id));
        }
    }

    fn calendar() -> (Calendar, Log) {
        let log = Log::default();
        let calendar = Calendar::new(
            vec![seeded()],
            CalendarView::Month,
            at(15, 12),
            log.clone(),
            WeekStart::Sunday,
        );
        (calendar, log)
    }

    #[test]
    fn create_flow_adds_and_closes() {
        let (mut cal, log) = calendar();
        cal.click_date(at(16, 14));

        let mut form = cal.modal_form().unwrap();
        assert_eq!(form.start(), Some(at(16, 14)));
        form.title = "Lunch".to_string();

        let saved = cal.submit(&form).unwrap();

        assert_eq!(saved.start, at(16, 14));
        assert_eq!(saved.end, at(16, 15));
        assert_eq!(cal.events().len(), 2);
        assert!(!cal.state().is_modal_open);
        assert_eq!(cal.state().selected_date, None);
        assert_eq!(*log.entries.borrow(), vec!["add Lunch"]);
    }

    #[test]
    fn failed_submit_keeps_modal_open() {
        let (mut cal, log) = calendar();
        cal.click_date(at(16, 14));
        let form = cal.modal_form().unwrap();

        let err = cal.submit(&form).unwrap_err();

        assert_eq!(err.messages(), [TITLE_REQUIRED]);
        assert!(cal.state().is_modal_open);
        assert_eq!(cal.events().len(), 1);
        assert!(log.entries.borrow().is_empty());
    }

    #[test]
    fn edit_flow_updates_selected_event() {
        let (mut cal, log) = calendar();
        cal.click_event("e1");
        assert_eq!(cal.state().modal_mode, ModalMode::Edit);

        let mut form = cal.modal_form().unwrap();
        assert_eq!(form.title, "Standup");
        form.title = "Retro".to_string();
        form.description = String::new();

        let saved = cal.submit(&form).unwrap();

        assert_eq!(saved.id, "e1");
        assert_eq!(saved.title, "Retro");
        assert_eq!(saved.description, None);
        assert_eq!(cal.events()[0], saved);
        assert!(!cal.state().is_modal_open);
        assert_eq!(cal.state().selected_event, None);
        assert_eq!(*log.entries.borrow(), vec!["update e1"]);
    }

    #[test]
    fn editing_a_vanished_event_is_reported() {
        let (mut cal, _log) = calendar();
        cal.click_event("e1");
        let form = cal.modal_form().unwrap();
        cal.store.delete("e1");

        assert!(matches!(
            cal.submit(&form),
            Err(CalGridError::EventNotFound(id)) if id == "e1"
        ));
    }

    #[test]
    fn unknown_event_click_is_ignored() {
        let (mut cal, _log) = calendar();
        cal.click_event("missing");
        assert!(!cal.state().is_modal_open);
        assert_eq!(cal.modal_form(), None);
    }

    #[test]
    fn submit_without_modal_fails() {
        let (mut cal, _log) = calendar();
        assert!(matches!(
            cal.submit(&EventForm::default()),
            Err(CalGridError::ModalClosed)
        ));
    }

    #[test]
    fn delete_selected_removes_and_closes() {
        let (mut cal, log) = calendar();
        cal.click_event("e1");

        assert!(cal.delete_selected());
        assert!(cal.events().is_empty());
        assert!(!cal.state().is_modal_open);
        assert_eq!(*log.entries.borrow(), vec!["delete e1"]);
    }

    #[test]
    fn delete_selected_needs_edit_mode() {
        let (mut cal, log) = calendar();
        cal.click_date(at(15, 9));

        assert!(!cal.delete_selected());
        assert_eq!(cal.events().len(), 1);
        assert!(cal.state().is_modal_open);
        assert!(log.entries.borrow().is_empty());
    }

    #[test]
    fn day_and_slot_lookups_read_the_store() {
        let (mut cal, _log) = calendar();
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(cal.events_on_day(day).len(), 1);
        assert_eq!(
            cal.events_in_slot(day, NaiveTime::from_hms_opt(9, 0, 0).unwrap()).len(),
            1
        );

        cal.view_mut().set_view(CalendarView::Week);
        assert!(cal.visible_days().contains(&day));
    }
}
