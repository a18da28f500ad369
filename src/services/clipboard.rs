//! System clipboard access

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy `text` to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text)
        .context("Failed to write to the clipboard")?;
    tracing::debug!("Copied {} bytes to the clipboard", text.len());
    Ok(())
}
