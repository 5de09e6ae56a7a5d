// Rust guideline compliant 2026-08-02

//! Demo adapter for the `Clipboard` port.
//!
//! Logs the copied text at `info` level and always returns `Ok(())`.
//! `ClipboardError::WriteFailed` is unreachable in this demo adapter.

use domain::{Clipboard, ClipboardError};

/// `Clipboard` adapter that logs instead of touching a real clipboard.
///
/// Always returns `Ok(())`; use a platform implementation for real copying.
#[derive(Debug)]
pub struct LogClipboard;

impl LogClipboard {
    /// Create a new log clipboard adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for LogClipboard {
    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        tracing::info!("log_clipboard.copied: chars={}", text.chars().count());
        Ok(())
    }
}
