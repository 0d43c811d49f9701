use anyhow::Result;
use calgrid_core::grid::time_slots;
use calgrid_core::view::CalendarView;

use super::{Context, resolve_date};
use crate::render::render_week;

pub fn run(ctx: &Context, date: Option<&str>, interval: Option<u32>, all_slots: bool) -> Result<()> {
    let date = resolve_date(date)?;
    let interval = interval.unwrap_or(ctx.config.slot_interval_minutes);
    let slots = time_slots(interval)?;

    let mut calendar = ctx.calendar(CalendarView::Week, date, ())?;
    calendar.view_mut().set_view(CalendarView::Week);

    for line in render_week(&calendar, &slots, all_slots) {
        println!("{}", line);
    }

    Ok(())
}
