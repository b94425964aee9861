//! Unread-count tracking state machine
//!
//! Compares each snapshot against the immediately preceding one and
//! decides whether to notify. The baseline is updated on every path, so
//! an ignored snapshot still resets the comparison point.

use crate::{AuthorizationStatus, NotificationContent, NotificationSound};
use mailport_bridge::UnreadSnapshot;
use mailport_core::APP_NAME;

/// What to do in response to one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerAction {
    /// Nothing to do
    Ignore,
    /// Permission is undetermined; ask now, notify on a later snapshot
    RequestPermission,
    /// Raise exactly one notification
    Notify(NewMailAlert),
}

/// Summary of an unread-count increase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMailAlert {
    /// How many messages arrived since the previous snapshot
    pub delta: u32,
    /// Newest unread message's subject, possibly empty
    pub subject: String,
    /// Newest unread message's sender, possibly empty
    pub from: String,
}

/// Derives notification decisions from unread-count snapshots
#[derive(Debug, Default)]
pub struct UnreadTracker {
    /// None until the first snapshot seeds the baseline
    previous: Option<u32>,
}

impl UnreadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one snapshot.
    ///
    /// The first-ever snapshot never notifies; it only seeds the baseline.
    pub fn observe(
        &mut self,
        snapshot: &UnreadSnapshot,
        notifications_enabled: bool,
        status: AuthorizationStatus,
    ) -> TrackerAction {
        let previous = self.previous.replace(snapshot.count);

        if !notifications_enabled {
            return TrackerAction::Ignore;
        }
        if status == AuthorizationStatus::NotDetermined {
            return TrackerAction::RequestPermission;
        }
        if status != AuthorizationStatus::Authorized {
            return TrackerAction::Ignore;
        }
        let Some(previous) = previous else {
            return TrackerAction::Ignore;
        };
        if snapshot.count <= previous {
            return TrackerAction::Ignore;
        }

        TrackerAction::Notify(NewMailAlert {
            delta: snapshot.count - previous,
            subject: snapshot.subject.clone(),
            from: snapshot.from.clone(),
        })
    }
}

/// Build notification content for an alert.
///
/// Prefers sender as title and subject as body; falls back to a generic
/// "N new emails" message when the page gave no metadata.
pub fn format_content(alert: &NewMailAlert, sound: NotificationSound) -> NotificationContent {
    let (title, body) = if !alert.subject.is_empty() && !alert.from.is_empty() {
        (alert.from.clone(), alert.subject.clone())
    } else if !alert.subject.is_empty() {
        (APP_NAME.to_string(), alert.subject.clone())
    } else if alert.delta == 1 {
        (APP_NAME.to_string(), "You have 1 new email".to_string())
    } else {
        (
            APP_NAME.to_string(),
            format!("You have {} new emails", alert.delta),
        )
    };
    NotificationContent { title, body, sound }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(count: u32, subject: &str, from: &str) -> UnreadSnapshot {
        UnreadSnapshot {
            count,
            subject: subject.to_string(),
            from: from.to_string(),
        }
    }

    #[test]
    fn test_first_snapshot_only_seeds_baseline() {
        let mut tracker = UnreadTracker::new();
        let action = tracker.observe(
            &snapshot(3, "Hi", "Bob"),
            true,
            AuthorizationStatus::Authorized,
        );
        assert_eq!(action, TrackerAction::Ignore);

        // Baseline is 3 now: 3 -> 7 notifies with delta 4
        let action = tracker.observe(
            &snapshot(7, "Update", "Alice"),
            true,
            AuthorizationStatus::Authorized,
        );
        assert_eq!(
            action,
            TrackerAction::Notify(NewMailAlert {
                delta: 4,
                subject: "Update".to_string(),
                from: "Alice".to_string()
            })
        );
    }

    #[test]
    fn test_unchanged_count_does_not_notify() {
        let mut tracker = UnreadTracker::new();
        tracker.observe(&snapshot(5, "", ""), true, AuthorizationStatus::Authorized);
        let action = tracker.observe(&snapshot(5, "", ""), true, AuthorizationStatus::Authorized);
        assert_eq!(action, TrackerAction::Ignore);
    }

    #[test]
    fn test_decrease_resets_baseline_without_notifying() {
        let mut tracker = UnreadTracker::new();
        tracker.observe(&snapshot(7, "", ""), true, AuthorizationStatus::Authorized);
        let action = tracker.observe(&snapshot(4, "", ""), true, AuthorizationStatus::Authorized);
        assert_eq!(action, TrackerAction::Ignore);

        // 4 -> 5 is an increase of 1 against the reset baseline
        let action = tracker.observe(&snapshot(5, "", ""), true, AuthorizationStatus::Authorized);
        assert_eq!(
            action,
            TrackerAction::Notify(NewMailAlert {
                delta: 1,
                subject: String::new(),
                from: String::new()
            })
        );
    }

    #[test]
    fn test_disabled_updates_baseline_and_never_prompts() {
        let mut tracker = UnreadTracker::new();
        tracker.observe(&snapshot(1, "", ""), false, AuthorizationStatus::NotDetermined);
        let action = tracker.observe(
            &snapshot(9, "", ""),
            false,
            AuthorizationStatus::NotDetermined,
        );
        // Disabled wins over the undetermined permission state
        assert_eq!(action, TrackerAction::Ignore);
    }

    #[test]
    fn test_undetermined_requests_permission_and_skips() {
        let mut tracker = UnreadTracker::new();
        tracker.observe(&snapshot(1, "", ""), true, AuthorizationStatus::Authorized);
        let action = tracker.observe(
            &snapshot(5, "New", "Carol"),
            true,
            AuthorizationStatus::NotDetermined,
        );
        assert_eq!(action, TrackerAction::RequestPermission);

        // The skipped snapshot still moved the baseline to 5
        let action = tracker.observe(&snapshot(5, "", ""), true, AuthorizationStatus::Authorized);
        assert_eq!(action, TrackerAction::Ignore);
    }

    #[test]
    fn test_denied_never_notifies() {
        let mut tracker = UnreadTracker::new();
        tracker.observe(&snapshot(1, "", ""), true, AuthorizationStatus::Denied);
        let action = tracker.observe(&snapshot(6, "", ""), true, AuthorizationStatus::Denied);
        assert_eq!(action, TrackerAction::Ignore);
    }

    #[test]
    fn test_content_prefers_sender_and_subject() {
        let alert = NewMailAlert {
            delta: 4,
            subject: "Update".to_string(),
            from: "Alice".to_string(),
        };
        let content = format_content(&alert, NotificationSound::Default);
        assert_eq!(content.title, "Alice");
        assert_eq!(content.body, "Update");
    }

    #[test]
    fn test_content_subject_only() {
        let alert = NewMailAlert {
            delta: 2,
            subject: "Reminder".to_string(),
            from: String::new(),
        };
        let content = format_content(&alert, NotificationSound::None);
        assert_eq!(content.title, APP_NAME);
        assert_eq!(content.body, "Reminder");
    }

    #[test]
    fn test_content_generic_fallback_pluralizes() {
        let one = NewMailAlert {
            delta: 1,
            subject: String::new(),
            from: String::new(),
        };
        assert_eq!(
            format_content(&one, NotificationSound::Default).body,
            "You have 1 new email"
        );

        let three = NewMailAlert {
            delta: 3,
            subject: String::new(),
            from: String::new(),
        };
        assert_eq!(
            format_content(&three, NotificationSound::Default).body,
            "You have 3 new emails"
        );
    }
}
