//! Copy text through whichever clipboard tool is installed.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Candidate tools, tried in order.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

fn find_tool() -> Option<(&'static str, &'static [&'static str])> {
    CLIPBOARD_TOOLS
        .iter()
        .find(|(name, _)| which::which(name).is_ok())
        .copied()
}

/// Pipe `text` into the first clipboard tool found on PATH.
pub async fn copy(text: String) -> Result<()> {
    let (program, args) = find_tool().context("No clipboard tool found on PATH")?;
    tracing::debug!(program, "Copying to clipboard");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", program))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", program, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_are_tried_in_order() {
        let names: Vec<&str> = CLIPBOARD_TOOLS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["wl-copy", "xclip", "xsel", "pbcopy", "clip"]);
    }
}
