use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::commands::Context;

pub fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let mut editor = ctx.editor();
    let Some(event) = editor.find(id) else {
        anyhow::bail!("Event '{}' not found. Run `eden list` to see event ids.", id);
    };

    if !yes && !confirm(&format!("Remove \"{}\" from the schedule?", event.title))? {
        println!("{}", "  Nothing removed".dimmed());
        return Ok(());
    }

    let removed = editor.delete(id)?;
    println!("{}", format!("  Removed: {}", removed.title).red());
    Ok(())
}

pub fn run_reset(ctx: &Context, yes: bool) -> Result<()> {
    if !yes && !confirm("Reset schedule to default events? This cannot be undone.")? {
        println!("{}", "  Schedule unchanged".dimmed());
        return Ok(());
    }

    let mut editor = ctx.editor();
    let count = editor.reset_to_defaults().len();
    println!("{}", format!("  Schedule reset to {} default events", count).green());
    Ok(())
}

pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("  {}", prompt))
        .default(false)
        .interact()?)
}
