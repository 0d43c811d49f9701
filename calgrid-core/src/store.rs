//! In-memory event store.
//!
//! The store owns the canonical event list. Callers get shared references or
//! clones, never mutable access. Every mutation validates first, commits, and
//! only then notifies the observer.

use tracing::debug;

use crate::error::{CalGridError, CalGridResult};
use crate::event::{CalendarEvent, EventDraft, EventUpdate, NewEvent, generate_event_id};
use crate::validation::{validate, validate_update};

/// Host hooks called after a successful mutation.
pub trait EventObserver {
    fn on_add(&mut self, _event: &NewEvent) {}
    fn on_update(&mut self, _id: &str, _update: &EventUpdate) {}
    fn on_delete(&mut self, _id: &str) {}
}

impl EventObserver for () {}

type AddHook = Box<dyn FnMut(&NewEvent)>;
type UpdateHook = Box<dyn FnMut(&str, &EventUpdate)>;
type DeleteHook = Box<dyn FnMut(&str)>;

/// Observer built from optional closures.
#[derive(Default)]
pub struct Callbacks {
    pub on_add: Option<AddHook>,
    pub on_update: Option<UpdateHook>,
    pub on_delete: Option<DeleteHook>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add(mut self, hook: impl FnMut(&NewEvent) + 'static) -> Self {
        self.on_add = Some(Box::new(hook));
        self
    }

    pub fn with_update(mut self, hook: impl FnMut(&str, &EventUpdate) + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn with_delete(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_delete = Some(Box::new(hook));
        self
    }
}

impl EventObserver for Callbacks {
    fn on_add(&mut self, event: &NewEvent) {
        if let Some(hook) = self.on_add.as_mut() {
            hook(event);
        }
    }

    fn on_update(&mut self, id: &str, update: &EventUpdate) {
        if let Some(hook) = self.on_update.as_mut() {
            hook(id, update);
        }
    }

    fn on_delete(&mut self, id: &str) {
        if let Some(hook) = self.on_delete.as_mut() {
            hook(id);
        }
    }
}

pub struct EventStore {
    events: Vec<CalendarEvent>,
    observer: Box<dyn EventObserver>,
}

impl EventStore {
    /// Create a store seeded with host-supplied events.
    ///
    /// Initial events are taken as-is and are not announced to the observer.
    pub fn new(initial: Vec<CalendarEvent>, observer: impl EventObserver + 'static) -> Self {
        EventStore {
            events: initial,
            observer: Box::new(observer),
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate and append a new event, assigning it a fresh id.
    pub fn add(&mut self, new: NewEvent) -> CalGridResult<CalendarEvent> {
        let errors = validate(&EventDraft::from(&new));
        if !errors.is_empty() {
            return Err(CalGridError::ValidationFailed(errors));
        }

        let event = CalendarEvent::from_new(generate_event_id(), new.clone());
        self.events.push(event.clone());
        debug!(id = %event.id, title = %event.title, "added event");

        self.observer.on_add(&new);
        Ok(event)
    }

    /// Merge the fields present in `update` into the event with `id`.
    ///
    /// Returns the merged event, or `None` when no event has that id. An unknown
    /// id changes nothing and does not notify the observer.
    pub fn update(
        &mut self,
        id: &str,
        update: EventUpdate,
    ) -> CalGridResult<Option<CalendarEvent>> {
        let errors = validate_update(&update);
        if !errors.is_empty() {
            return Err(CalGridError::ValidationFailed(errors));
        }

        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            debug!(id, "update for unknown event ignored");
            return Ok(None);
        };

        let mut merged = self.events[index].clone();
        merged.apply(&update);

        // A lone start or end must still agree with the stored counterpart
        let errors = validate(&EventDraft::from(&merged));
        if !errors.is_empty() {
            return Err(CalGridError::ValidationFailed(errors));
        }

        self.events[index] = merged.clone();
        debug!(id, "updated event");

        self.observer.on_update(id, &update);
        Ok(Some(merged))
    }

    /// Remove the event with `id`. Returns whether anything was removed.
    ///
    /// The observer is only notified when an event was actually removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);

        if self.events.len() == before {
            debug!(id, "delete for unknown event ignored");
            return false;
        }

        debug!(id, "deleted event");
        self.observer.on_delete(id);
        true
    }
}
