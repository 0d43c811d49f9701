use anyhow::Result;
use calgrid_core::store::Callbacks;
use calgrid_core::{CalGridError, Calendar};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::{Context, resolve_date};
use crate::render::Render;

pub fn run(ctx: &Context, id: &str, force: bool) -> Result<()> {
    // The host mirrors deletions by printing the removed id
    let callbacks = Callbacks::new().with_delete(|id: &str| {
        match serde_json::to_string_pretty(&serde_json::json!({ "id": id })) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("could not serialize deleted id: {}", e),
        }
    });

    let mut calendar = ctx.calendar(ctx.config.default_view, resolve_date(None)?, callbacks)?;

    let Some(event) = calendar.store().get(id) else {
        return Err(CalGridError::EventNotFound(id.to_string()).into());
    };
    eprintln!("  {}", event.render());

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("  Delete this event?")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    delete(&mut calendar, id)?;
    eprintln!("{}", "  Deleted".green());
    Ok(())
}

/// Drive the widget's delete flow: click the event, then delete from the modal.
fn delete(calendar: &mut Calendar, id: &str) -> Result<(), CalGridError> {
    calendar.click_event(id);

    if calendar.delete_selected() {
        Ok(())
    } else {
        Err(CalGridError::EventNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::CalendarEvent;
    use calgrid_core::grid::WeekStart;
    use calgrid_core::view::CalendarView;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn event(id: &str, title: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            start: at(9),
            end: at(10),
            color: None,
            category: None,
        }
    }

    fn calendar_with_sink() -> (Calendar, Rc<RefCell<Vec<String>>>) {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let sink = deleted.clone();
        let callbacks = Callbacks::new().with_delete(move |id: &str| sink.borrow_mut().push(id.to_string()));
        let calendar = Calendar::new(
            vec![event("e1", "Standup"), event("e2", "Lunch")],
            CalendarView::Month,
            at(0),
            callbacks,
            WeekStart::Sunday,
        );
        (calendar, deleted)
    }

    #[test]
    fn deletes_only_the_given_event() {
        let (mut calendar, deleted) = calendar_with_sink();

        delete(&mut calendar, "e1").unwrap();

        assert_eq!(calendar.events(), [event("e2", "Lunch")]);
        assert!(!calendar.state().is_modal_open);
        assert_eq!(*deleted.borrow(), vec!["e1".to_string()]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (mut calendar, deleted) = calendar_with_sink();

        let err = delete(&mut calendar, "missing").unwrap_err();

        assert!(matches!(err, CalGridError::EventNotFound(id) if id == "missing"));
        assert_eq!(calendar.events().len(), 2);
        assert!(deleted.borrow().is_empty());
    }
}
