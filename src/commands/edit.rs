use anyhow::Result;
use calgrid_core::store::Callbacks;
use calgrid_core::{CalGridError, Calendar, CalendarEvent, EventUpdate, resolve_color};
use chrono::NaiveDateTime;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{Context, parse_datetime, resolve_date};
use crate::render::Render;

pub struct EditArgs {
    pub id: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.description.is_some()
            || self.color.is_some()
            || self.category.is_some()
    }
}

/// Field edits to apply on top of the prefilled form. `None` keeps the
/// current value; an empty string clears an optional field.
#[derive(Default)]
struct Changes {
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    description: Option<String>,
    color: Option<String>,
    category: Option<String>,
}

pub fn run(ctx: &Context, args: EditArgs) -> Result<()> {
    // The host mirrors edits by printing the update payload
    let callbacks = Callbacks::new().with_update(|id: &str, update: &EventUpdate| {
        let payload = serde_json::to_value(update)
            .and_then(|update| serde_json::to_string_pretty(&serde_json::json!({ "id": id, "update": update })));
        match payload {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("could not serialize event update: {}", e),
        }
    });

    let mut calendar = ctx.calendar(ctx.config.default_view, resolve_date(None)?, callbacks)?;

    let Some(current) = calendar.store().get(&args.id).cloned() else {
        return Err(CalGridError::EventNotFound(args.id).into());
    };

    let changes = if args.has_changes() {
        Changes {
            title: args.title,
            start: args.start.as_deref().map(parse_datetime).transpose()?,
            end: args.end.as_deref().map(parse_datetime).transpose()?,
            description: args.description,
            color: args.color.as_deref().map(resolve_color),
            category: args.category,
        }
    } else {
        eprintln!("  {}", current.render());
        prompt_changes(&current)?
    };

    match edit(&mut calendar, &current.id, changes) {
        Ok(event) => {
            eprintln!("{}", format!("  Updated: {}", event.title).green());
            Ok(())
        }
        Err(CalGridError::ValidationFailed(messages)) => {
            for message in &messages {
                eprintln!("  {}", message.red());
            }
            anyhow::bail!("Event not updated")
        }
        Err(e) => Err(e.into()),
    }
}

/// Drive the widget's edit flow: click the event, change the form, submit.
fn edit(calendar: &mut Calendar, id: &str, changes: Changes) -> Result<CalendarEvent, CalGridError> {
    calendar.click_event(id);

    let mut form = calendar
        .modal_form()
        .ok_or_else(|| CalGridError::EventNotFound(id.to_string()))?;

    if let Some(title) = changes.title {
        form.title = title;
    }
    if let Some(start) = changes.start {
        form.set_start(start);
    }
    if let Some(end) = changes.end {
        form.set_end(end);
    }
    if let Some(description) = changes.description {
        form.description = description;
    }
    if let Some(color) = changes.color {
        form.color = color;
    }
    if let Some(category) = changes.category {
        form.category = category;
    }

    let result = calendar.submit(&form);
    if result.is_err() {
        calendar.view_mut().close_modal();
    }
    result
}

/// Ask for each field, offering the current value as the default.
fn prompt_changes(current: &CalendarEvent) -> Result<Changes> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .default(current.title.clone())
        .interact_text()?;

    let start = prompt_datetime("  Start", current.start)?;
    let end = prompt_datetime("  End", current.end)?;

    let description: String = Input::new()
        .with_prompt("  Description")
        .default(current.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let category: String = Input::new()
        .with_prompt("  Category")
        .default(current.category.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(Changes {
        title: Some(title),
        start: Some(start),
        end: Some(end),
        description: Some(description),
        color: None,
        category: Some(category),
    })
}

fn prompt_datetime(prompt: &str, current: NaiveDateTime) -> Result<NaiveDateTime> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(current.format("%Y-%m-%d %H:%M").to_string())
            .interact_text()?;
        match parse_datetime(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::grid::WeekStart;
    use calgrid_core::validation::END_BEFORE_START;
    use calgrid_core::view::CalendarView;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn seeded() -> CalendarEvent {
        CalendarEvent {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            description: Some("Daily".to_string()),
            start: at(9),
            end: at(10),
            color: None,
            category: Some("work".to_string()),
        }
    }

    fn calendar_with_sink() -> (Calendar, Rc<RefCell<Vec<(String, EventUpdate)>>>) {
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = updates.clone();
        let callbacks = Callbacks::new()
            .with_update(move |id: &str, u: &EventUpdate| sink.borrow_mut().push((id.to_string(), u.clone())));
        let calendar = Calendar::new(vec![seeded()], CalendarView::Month, at(0), callbacks, WeekStart::Sunday);
        (calendar, updates)
    }

    #[test]
    fn edits_title_and_keeps_the_rest() {
        let (mut calendar, updates) = calendar_with_sink();
        let changes = Changes {
            title: Some("Retro".to_string()),
            ..Default::default()
        };

        let event = edit(&mut calendar, "e1", changes).unwrap();

        assert_eq!(event.id, "e1");
        assert_eq!(event.title, "Retro");
        assert_eq!(event.start, at(9));
        assert_eq!(event.end, at(10));
        assert_eq!(event.description.as_deref(), Some("Daily"));
        assert_eq!(calendar.events(), [event]);
        assert!(!calendar.state().is_modal_open);

        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "e1");
        assert_eq!(updates[0].1.title.as_deref(), Some("Retro"));
    }

    #[test]
    fn blank_description_clears_it() {
        let (mut calendar, _updates) = calendar_with_sink();
        let changes = Changes {
            description: Some(String::new()),
            ..Default::default()
        };

        let event = edit(&mut calendar, "e1", changes).unwrap();
        assert_eq!(event.description, None);
    }

    #[test]
    fn end_before_stored_start_is_rejected() {
        let (mut calendar, updates) = calendar_with_sink();
        let changes = Changes {
            end: Some(at(8)),
            ..Default::default()
        };

        let err = edit(&mut calendar, "e1", changes).unwrap_err();

        assert_eq!(err.messages(), [END_BEFORE_START]);
        assert_eq!(calendar.events(), [seeded()]);
        assert!(!calendar.state().is_modal_open);
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (mut calendar, updates) = calendar_with_sink();

        let err = edit(&mut calendar, "missing", Changes::default()).unwrap_err();

        assert!(matches!(err, CalGridError::EventNotFound(id) if id == "missing"));
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn flags_count_as_changes() {
        let mut args = EditArgs {
            id: "e1".to_string(),
            title: None,
            start: None,
            end: None,
            description: None,
            color: None,
            category: None,
        };
        assert!(!args.has_changes());
        args.category = Some(String::new());
        assert!(args.has_changes());
    }
}
