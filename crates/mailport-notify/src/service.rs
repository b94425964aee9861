//! Glue between the tracker and the notification backend

use crate::{
    format_content, AuthorizationStatus, NotificationBackend, NotificationSound, TrackerAction,
    UnreadTracker,
};
use mailport_bridge::UnreadSnapshot;
use std::sync::Arc;
use tracing::debug;

/// Drives the [`UnreadTracker`] against a notification backend
pub struct NotificationService {
    tracker: UnreadTracker,
    backend: Arc<dyn NotificationBackend>,
}

impl NotificationService {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self {
            tracker: UnreadTracker::new(),
            backend,
        }
    }

    /// Current permission state, as reported by the backend
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.backend.authorization_status()
    }

    /// Process one snapshot: maybe request permission, maybe post exactly
    /// one notification.
    pub async fn on_snapshot(
        &mut self,
        snapshot: &UnreadSnapshot,
        notifications_enabled: bool,
        sound_setting: &str,
    ) {
        let status = self.backend.authorization_status();
        match self
            .tracker
            .observe(snapshot, notifications_enabled, status)
        {
            TrackerAction::Ignore => {}
            TrackerAction::RequestPermission => {
                debug!("Notification permission undetermined, requesting");
                self.backend.request_authorization().await;
            }
            TrackerAction::Notify(alert) => {
                let content =
                    format_content(&alert, NotificationSound::from_setting(sound_setting));
                debug!(
                    "Posting new-mail notification (delta {}): {}",
                    alert.delta, content.body
                );
                self.backend.post(&content);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationContent;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockBackend {
        status: Mutex<AuthorizationStatus>,
        requests: Mutex<u32>,
        posted: Mutex<Vec<NotificationContent>>,
    }

    impl MockBackend {
        fn with_status(status: AuthorizationStatus) -> Arc<Self> {
            Arc::new(Self {
                status: Mutex::new(status),
                requests: Mutex::new(0),
                posted: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl NotificationBackend for MockBackend {
        fn authorization_status(&self) -> AuthorizationStatus {
            *self.status.lock().unwrap()
        }

        async fn request_authorization(&self) {
            *self.requests.lock().unwrap() += 1;
            // The user granted permission
            *self.status.lock().unwrap() = AuthorizationStatus::Authorized;
        }

        fn post(&self, content: &NotificationContent) {
            self.posted.lock().unwrap().push(content.clone());
        }
    }

    fn snapshot(count: u32, subject: &str, from: &str) -> UnreadSnapshot {
        UnreadSnapshot {
            count,
            subject: subject.to_string(),
            from: from.to_string(),
        }
    }

    #[tokio::test]
    async fn test_notifies_once_per_increase() {
        let backend = MockBackend::with_status(AuthorizationStatus::Authorized);
        let mut service = NotificationService::new(backend.clone());

        service.on_snapshot(&snapshot(3, "", ""), true, "default").await;
        service
            .on_snapshot(&snapshot(7, "Update", "Alice"), true, "default")
            .await;

        let posted = backend.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].title, "Alice");
        assert_eq!(posted[0].body, "Update");
        assert_eq!(posted[0].sound, NotificationSound::Default);
    }

    #[tokio::test]
    async fn test_undetermined_requests_then_notifies_next_time() {
        let backend = MockBackend::with_status(AuthorizationStatus::NotDetermined);
        let mut service = NotificationService::new(backend.clone());

        service.on_snapshot(&snapshot(2, "", ""), true, "default").await;
        // Permission was requested, nothing posted on that event
        assert_eq!(*backend.requests.lock().unwrap(), 1);
        assert!(backend.posted.lock().unwrap().is_empty());

        // Mock granted permission; an increase now notifies
        service
            .on_snapshot(&snapshot(3, "Hi", "Bob"), true, "none")
            .await;
        let posted = backend.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].sound, NotificationSound::None);
    }

    #[tokio::test]
    async fn test_disabled_never_requests_nor_posts() {
        let backend = MockBackend::with_status(AuthorizationStatus::NotDetermined);
        let mut service = NotificationService::new(backend.clone());

        service.on_snapshot(&snapshot(1, "", ""), false, "default").await;
        service.on_snapshot(&snapshot(9, "", ""), false, "default").await;

        assert_eq!(*backend.requests.lock().unwrap(), 0);
        assert!(backend.posted.lock().unwrap().is_empty());
    }
}
