//! System clipboard access

use tracing::warn;

/// Copy text to the system clipboard. Best-effort: failures are logged,
/// never surfaced.
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text.to_string()) {
                warn!("Failed to write clipboard: {}", e);
            }
        }
        Err(e) => warn!("Clipboard unavailable: {}", e),
    }
}
