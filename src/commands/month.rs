use anyhow::Result;
use calgrid_core::view::CalendarView;

use super::{Context, resolve_date};
use crate::render::render_month;

pub fn run(ctx: &Context, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let mut calendar = ctx.calendar(CalendarView::Month, date, ())?;
    calendar.view_mut().set_view(CalendarView::Month);

    for line in render_month(&calendar) {
        println!("{}", line);
    }

    Ok(())
}
