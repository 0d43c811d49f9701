//! Terminal rendering for the calendar widget.
//!
//! Cells are padded as plain text first and colored afterwards, so ANSI codes
//! never throw the grid columns off. Widths are terminal columns, so wide
//! glyphs count double.

use calgrid_core::format::{format_day, format_time, format_weekday};
use calgrid_core::grid::{is_current_month, is_today};
use calgrid_core::{Calendar, CalendarEvent};
use chrono::{NaiveDate, NaiveTime};
use owo_colors::OwoColorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of one day column, without the separating space.
const CELL_WIDTH: usize = 14;

/// Width of the time label column in the week grid.
const TIME_WIDTH: usize = 6;

/// Event titles per month cell. Extra events show as "+N more" on a row below.
const MAX_CELL_EVENTS: usize = 3;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = format!(
            "{}-{}",
            format_time(self.start.time()),
            format_time(self.end.time())
        );
        let mut line = format!("{} {}", time.dimmed(), paint(&self.title, self.display_color()));

        if let Some(category) = &self.category {
            line.push_str(&format!(" {}", format!("[{}]", category).dimmed()));
        }

        if self.is_multi_day() {
            let until = format!("(until {})", self.end.format("%a %b %-d %H:%M"));
            line.push_str(&format!(" {}", until.dimmed()));
        }

        line
    }
}

/// Color `text` with a "#rrggbb" hex color, or leave it plain if unparseable.
fn paint(text: &str, hex: &str) -> String {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let budget = width.saturating_sub(1);
    let mut truncated = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        truncated.push(c);
        used += w;
    }

    // A wide glyph that does not fit leaves a gap before the ellipsis
    format!("{}{}…", truncated, " ".repeat(budget - used))
}

fn center(text: &str, width: usize) -> String {
    let left = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(left), text)
}

fn style_day(cell: String, day: NaiveDate, anchor: NaiveDate) -> String {
    if is_today(day) {
        cell.reversed().to_string()
    } else if !is_current_month(day, anchor) {
        cell.dimmed().to_string()
    } else {
        cell
    }
}

fn grid_width(columns: usize) -> usize {
    columns * CELL_WIDTH + columns.saturating_sub(1)
}

/// Render the month grid for the calendar's current period.
pub fn render_month(calendar: &Calendar) -> Vec<String> {
    let anchor = calendar.state().current_date.date();
    let days = calendar.visible_days();
    let mut lines = Vec::new();

    lines.push(center(&calendar.view().period_title(), grid_width(7)).bold().to_string());

    let header: Vec<String> = days
        .iter()
        .take(7)
        .map(|d| fit(&format_weekday(*d), CELL_WIDTH))
        .collect();
    lines.push(header.join(" ").bold().to_string());

    for week in days.chunks(7) {
        let numbers: Vec<String> = week
            .iter()
            .map(|d| style_day(fit(&format_day(*d), CELL_WIDTH), *d, anchor))
            .collect();
        lines.push(numbers.join(" "));

        let per_day: Vec<Vec<&CalendarEvent>> =
            week.iter().map(|d| calendar.events_on_day(*d)).collect();

        for row in 0..MAX_CELL_EVENTS {
            let cells: Vec<String> = per_day.iter().map(|events| month_cell_line(events, row)).collect();
            lines.push(cells.join(" ").trim_end().to_string());
        }

        if per_day.iter().any(|events| events.len() > MAX_CELL_EVENTS) {
            let cells: Vec<String> = per_day.iter().map(|events| overflow_line(events)).collect();
            lines.push(cells.join(" ").trim_end().to_string());
        }
    }

    lines
}

fn month_cell_line(events: &[&CalendarEvent], row: usize) -> String {
    match events.get(row) {
        Some(event) => paint(&fit(&event.title, CELL_WIDTH), event.display_color()),
        None => fit("", CELL_WIDTH),
    }
}

fn overflow_line(events: &[&CalendarEvent]) -> String {
    match events.len().checked_sub(MAX_CELL_EVENTS) {
        Some(hidden) if hidden > 0 => {
            let more = format!("+{} more", hidden);
            fit(&more, CELL_WIDTH).dimmed().to_string()
        }
        _ => fit("", CELL_WIDTH),
    }
}

/// Render the week grid: one row per slot that has events (or every slot).
pub fn render_week(calendar: &Calendar, slots: &[NaiveTime], all_slots: bool) -> Vec<String> {
    let days = calendar.visible_days();
    let mut lines = Vec::new();

    lines.push(calendar.view().period_title().bold().to_string());

    let mut header = vec![fit("", TIME_WIDTH)];
    header.extend(days.iter().map(|d| {
        let label = fit(&format!("{} {}", format_weekday(*d), format_day(*d)), CELL_WIDTH);
        if is_today(*d) {
            label.reversed().to_string()
        } else {
            label.bold().to_string()
        }
    }));
    lines.push(header.join(" "));

    let mut shown = 0;
    for slot in slots {
        let per_day: Vec<Vec<&CalendarEvent>> = days
            .iter()
            .map(|d| calendar.events_in_slot(*d, *slot))
            .collect();

        if !all_slots && per_day.iter().all(|events| events.is_empty()) {
            continue;
        }

        let mut row = vec![fit(&format_time(*slot), TIME_WIDTH).dimmed().to_string()];
        row.extend(per_day.iter().map(|events| week_cell(events)));
        lines.push(row.join(" ").trim_end().to_string());
        shown += 1;
    }

    if shown == 0 {
        lines.push("No events this week".dimmed().to_string());
    }

    lines
}

fn week_cell(events: &[&CalendarEvent]) -> String {
    let Some(first) = events.first() else {
        return fit("", CELL_WIDTH);
    };

    if events.len() == 1 {
        return paint(&fit(&first.title, CELL_WIDTH), first.display_color());
    }

    let suffix = format!(" +{}", events.len() - 1);
    let title = fit(&first.title, CELL_WIDTH - suffix.width());
    format!("{}{}", paint(&title, first.display_color()), suffix.dimmed())
}

/// Render an agenda for one day, ordered by start time.
pub fn render_day(calendar: &Calendar, day: NaiveDate) -> Vec<String> {
    let mut lines = vec![day.format("%a %B %-d, %Y").to_string().bold().to_string()];

    let mut events = calendar.events_on_day(day);
    if events.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
        return lines;
    }

    events.sort_by_key(|e| e.start);
    lines.extend(events.iter().map(|e| format!("  {}", e.render())));
    lines
}
