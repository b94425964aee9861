//! New-mail notifications for Mailport
//!
//! Converts unread-count snapshots reported by the page into at most one
//! desktop notification per increase, honoring the notification permission
//! state and the user's settings.

mod backend;
mod service;
mod tracker;

pub use backend::{
    AuthorizationStatus, DesktopBackend, NotificationBackend, NotificationContent,
    NotificationSound,
};
pub use service::NotificationService;
pub use tracker::{format_content, NewMailAlert, TrackerAction, UnreadTracker};
