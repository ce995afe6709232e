use anyhow::Result;
use eden_core::editor::TagChangeOutcome;
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::commands::delete::confirm;

pub fn list(ctx: &Context) -> Result<()> {
    let editor = ctx.editor();
    let tags = editor.shared_tags();

    if tags.is_empty() {
        println!("{}", "No shared tags yet.".dimmed());
        return Ok(());
    }

    for tag in tags {
        println!("{}", tag.cyan());
    }
    Ok(())
}

pub fn add(ctx: &Context, tags: &[String]) -> Result<()> {
    let mut editor = ctx.editor();

    if editor.add_shared_tags(tags) {
        println!("{}", "  Shared tags updated".green());
    } else {
        println!("{}", "  Those tags are already shared".dimmed());
    }
    Ok(())
}

pub fn rename(ctx: &Context, old: &str, new: &str) -> Result<()> {
    let mut editor = ctx.editor();

    let outcome = editor.rename_shared_tag(old, new)?;
    println!("{}", describe(old, Some(new), outcome));
    Ok(())
}

pub fn remove(ctx: &Context, tag: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Remove \"{}\" from shared tags and all events?", tag))? {
        println!("{}", "  Nothing removed".dimmed());
        return Ok(());
    }

    let mut editor = ctx.editor();
    let outcome = editor.remove_shared_tag(tag);
    println!("{}", describe(tag, None, outcome));
    Ok(())
}

fn describe(old: &str, new: Option<&str>, outcome: TagChangeOutcome) -> String {
    if !outcome.registry_changed && !outcome.schedule_changed {
        return format!("  No shared tag or event uses \"{}\"", old)
            .dimmed()
            .to_string();
    }

    let action = match new.map(str::trim).filter(|n| !n.is_empty()) {
        Some(new) => format!("  Renamed \"{}\" to \"{}\"", old, new),
        None => format!("  Removed \"{}\"", old),
    };
    let scope = if outcome.schedule_changed {
        " in shared tags and events"
    } else {
        " in shared tags"
    };
    format!("{}{}", action, scope).green().to_string()
}
