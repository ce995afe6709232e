use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};
use eden_core::transfer::DOWNLOAD_FILE_NAME;
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::utils::clipboard;

pub async fn export(ctx: &Context, output: Option<&Path>, copy: bool) -> Result<()> {
    let mut editor = ctx.editor();
    let json = editor.export().to_string();

    // The copy runs in the background while the JSON is written out.
    let copy_task = copy.then(|| tokio::spawn(clipboard::copy(json.clone())));

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(DOWNLOAD_FILE_NAME)
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("{}", format!("  Saved schedule to {}", path.display()).green());
        }
        None => println!("{}", json),
    }

    if let Some(task) = copy_task {
        match task.await {
            Ok(Ok(())) => eprintln!("{}", "Schedule JSON copied to clipboard.".green()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Clipboard copy failed");
                eprintln!(
                    "{}",
                    "Unable to copy. Please select the text and copy manually.".red()
                );
            }
            Err(e) => tracing::error!(error = %e, "Clipboard task panicked"),
        }
    }

    Ok(())
}

pub fn apply(ctx: &Context, source: &str) -> Result<()> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Could not read JSON from stdin")?;
        text
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Could not read {}", source))?
    };

    let mut editor = ctx.editor();
    let count = editor.apply_json(&text)?.len();

    println!(
        "{}",
        format!("  Schedule updated from JSON ({} events).", count).green()
    );
    Ok(())
}
