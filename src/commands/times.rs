use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::Context;

pub fn run(ctx: &Context, query: Option<&str>) -> Result<()> {
    let editor = ctx.editor();
    let times = editor.time_options(query.unwrap_or_default());

    if times.is_empty() {
        println!("{}", "No matching times".dimmed());
        return Ok(());
    }

    for time in times {
        println!("{}", time);
    }
    Ok(())
}
