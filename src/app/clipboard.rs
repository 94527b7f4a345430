//! Clipboard writing with a terminal escape fallback.
//!
//! The primary path goes through the system clipboard (`arboard`). When
//! that is unavailable (no display server, denied access), the fallback
//! asks the terminal emulator itself to set the selection via an OSC 52
//! escape written to the controlling tty. Only when both fail does the
//! caller see an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Write;
use thiserror::Error;

/// Clipboard write failure after both mechanisms were tried.
#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Copies text to the clipboard, falling back to OSC 52.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()))
    {
        Ok(()) => Ok(()),
        Err(_) => osc52_copy(text),
    }
}

/// Writes an OSC 52 sequence to /dev/tty with the base64-encoded payload.
fn osc52_copy(text: &str) -> Result<(), ClipboardError> {
    let payload = STANDARD.encode(text.as_bytes());

    let mut tty = std::fs::OpenOptions::new()
        .write(true)
        .open("/dev/tty")
        .map_err(|e| ClipboardError(e.to_string()))?;
    write!(tty, "\x1b]52;c;{}\x07", payload).map_err(|e| ClipboardError(e.to_string()))?;
    tty.flush().map_err(|e| ClipboardError(e.to_string()))?;
    Ok(())
}
