//! Host-side runtime for Mailport
//!
//! Owns the command/event loop between the native window and the embedded
//! page: bridge message ingress, link-preview resolution with stale-result
//! suppression, unread notifications, the host-driven unread poll, and
//! zoom persistence.

mod clipboard;
mod debounce;
mod hover;
mod shell;

pub use clipboard::copy_to_clipboard;
pub use debounce::Debouncer;
pub use hover::LinkPreview;
pub use shell::{Shell, ShellCommand, ShellEvent};
