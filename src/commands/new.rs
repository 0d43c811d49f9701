use anyhow::Result;
use calgrid_core::form::EventForm;
use calgrid_core::store::Callbacks;
use calgrid_core::view::CalendarView;
use calgrid_core::{CATEGORY_PRESETS, CalGridError, Calendar, CalendarEvent, NewEvent, resolve_color};
use chrono::NaiveDateTime;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{Context, parse_datetime};

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

/// Form input once prompts have filled the gaps.
struct Resolved {
    title: String,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    description: Option<String>,
    color: Option<String>,
    category: Option<String>,
}

pub fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.start.is_none();

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Start ---
    let start = match args.start {
        Some(s) => parse_datetime(&s)?,
        None => prompt_with_retry("  When? (YYYY-MM-DD HH:MM)")?,
    };

    let end = args.end.as_deref().map(parse_datetime).transpose()?;

    // --- Category ---
    let category = match args.category {
        Some(c) => Some(c),
        None if interactive => prompt_category()?,
        None => None,
    };

    let resolved = Resolved {
        title,
        start,
        end,
        description: args.description,
        color: args.color.as_deref().map(resolve_color),
        category,
    };

    // The host mirrors new events by printing them; nothing is stored on disk
    let callbacks = Callbacks::new().with_add(|event: &NewEvent| match serde_json::to_string_pretty(event) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("could not serialize new event: {}", e),
    });

    let mut calendar = ctx.calendar(ctx.config.default_view, start.date(), callbacks)?;

    if interactive {
        println!();
    }

    match create(&mut calendar, resolved) {
        Ok(event) => {
            eprintln!("{}", format!("  Created: {}", event.title).green());
            Ok(())
        }
        Err(CalGridError::ValidationFailed(messages)) => {
            for message in &messages {
                eprintln!("  {}", message.red());
            }
            anyhow::bail!("Event not created")
        }
        Err(e) => Err(e.into()),
    }
}

/// Drive the widget's create flow: click the start time, fill the form, submit.
fn create(calendar: &mut Calendar, input: Resolved) -> Result<CalendarEvent, CalGridError> {
    calendar.click_date(input.start);

    let mut form = calendar.modal_form().unwrap_or_else(|| EventForm::for_date(input.start));
    form.title = input.title;
    if let Some(end) = input.end {
        form.set_end(end);
    }
    if let Some(description) = input.description {
        form.description = description;
    }
    if let Some(color) = input.color {
        form.color = color;
    }
    if let Some(category) = input.category {
        form.category = category;
    }

    calendar.submit(&form)
}

/// Pick a category from the presets, or none.
fn prompt_category() -> Result<Option<String>> {
    let mut labels = vec!["(none)"];
    labels.extend(CATEGORY_PRESETS.iter().map(|(_, label)| *label));

    let choice = Select::new()
        .with_prompt("  Category")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(choice
        .checked_sub(1)
        .map(|i| CATEGORY_PRESETS[i].0.to_string()))
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry(prompt: &str) -> Result<NaiveDateTime> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_datetime(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
