use std::collections::HashSet;

use anyhow::Result;
use calgrid_core::validation::validate;
use calgrid_core::{CalendarEvent, EventDraft};
use owo_colors::OwoColorize;

use super::Context;

/// Problems found in one event of the file.
struct Report<'a> {
    event: &'a CalendarEvent,
    messages: Vec<String>,
}

pub fn run(ctx: &Context) -> Result<()> {
    let events = ctx.load_events()?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let reports = check_events(&events);

    for report in &reports {
        if report.messages.is_empty() {
            println!("{} {}", "✓".green(), report.event.title);
        } else {
            println!(
                "{} {} {}",
                "✗".red(),
                report.event.title,
                format!("({})", report.event.id).dimmed()
            );
            for message in &report.messages {
                println!("    {}", message.red());
            }
        }
    }

    let invalid = reports.iter().filter(|r| !r.messages.is_empty()).count();
    if invalid > 0 {
        anyhow::bail!("{} of {} events are invalid", invalid, events.len());
    }

    Ok(())
}

/// Validate each event and flag ids that appear more than once.
fn check_events(events: &[CalendarEvent]) -> Vec<Report<'_>> {
    let mut seen = HashSet::new();

    events
        .iter()
        .map(|event| {
            let mut messages = validate(&EventDraft::from(event));
            if event.id.trim().is_empty() {
                messages.push("Event id is empty".to_string());
            } else if !seen.insert(event.id.as_str()) {
                messages.push(format!("Duplicate event id '{}'", event.id));
            }
            Report { event, messages }
        })
        .collect()
}
