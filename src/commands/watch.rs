use anyhow::Result;
use eden_core::storage::{SCHEDULE_KEY, TAGS_KEY};
use owo_colors::OwoColorize;

use crate::commands::Context;

/// Follow the data directory and report what other editors change.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut editor = ctx.editor();
    let mut interval = tokio::time::interval(ctx.config.watch_interval());

    println!(
        "{}",
        format!(
            "Watching {} (Ctrl-C to stop)",
            ctx.storage.dir().display()
        )
        .dimmed()
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for change in editor.poll_storage() {
                    let line = match change.key.as_str() {
                        SCHEDULE_KEY => format!(
                            "  Schedule changed ({} events)",
                            editor.schedule().len()
                        ),
                        TAGS_KEY => format!(
                            "  Shared tags changed ({} tags)",
                            editor.shared_tags().len()
                        ),
                        other => format!("  {} changed", other),
                    };
                    println!("{}", line.yellow());
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
