use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::render::Render;

pub fn run(ctx: &Context) -> Result<()> {
    let editor = ctx.editor();
    let events = editor.sorted_schedule();

    if events.is_empty() {
        println!("{}", "No events scheduled.".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
