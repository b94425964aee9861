//! Notification delivery backend
//!
//! The OS notification center is an external collaborator: permission
//! state is queried, not owned, and delivery failures are logged and
//! swallowed.

use async_trait::async_trait;
use tracing::warn;

/// Permission state of the OS notification center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    Denied,
    Authorized,
}

/// Sound to play with a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationSound {
    Default,
    /// Silent
    None,
    /// A named system sound
    Named(String),
}

impl NotificationSound {
    /// Map the settings value ("default" / "none" / sound name).
    pub fn from_setting(value: &str) -> Self {
        match value {
            "default" => NotificationSound::Default,
            "none" => NotificationSound::None,
            name => NotificationSound::Named(name.to_string()),
        }
    }
}

/// Content of one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
}

/// Seam to the OS notification center
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Current permission state
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for permission; resolves once a definitive state exists
    async fn request_authorization(&self);

    /// Deliver one notification; failures are not surfaced
    fn post(&self, content: &NotificationContent);
}

/// Standard sound name for new-mail events on the desktop notification spec.
const NEW_MAIL_SOUND: &str = "message-new-email";

/// notify-rust delivery
///
/// Desktop notification daemons have no runtime permission prompt, so the
/// status is always Authorized and requesting is a no-op.
#[derive(Debug, Default)]
pub struct DesktopBackend;

impl DesktopBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationBackend for DesktopBackend {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Authorized
    }

    async fn request_authorization(&self) {}

    fn post(&self, content: &NotificationContent) {
        let mut notification = notify_rust::Notification::new();
        notification
            .summary(&content.title)
            .body(&content.body)
            .appname(mailport_core::APP_NAME);
        match &content.sound {
            NotificationSound::Default => {
                notification.sound_name(NEW_MAIL_SOUND);
            }
            NotificationSound::None => {}
            NotificationSound::Named(name) => {
                notification.sound_name(name);
            }
        }
        if let Err(e) = notification.show() {
            warn!("Failed to deliver notification: {}", e);
        }
    }
}
