use anyhow::Result;

use super::{Context, resolve_date};
use crate::render::render_day;

pub fn run(ctx: &Context, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let calendar = ctx.calendar(ctx.config.default_view, date, ())?;

    for line in render_day(&calendar, date) {
        println!("{}", line);
    }

    Ok(())
}
