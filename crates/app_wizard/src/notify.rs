//! Notification port
//!
//! Fire-and-forget success/error display. Notifications are never awaited
//! and never part of control flow; a lost notification cannot block or
//! corrupt the wizard.

use tracing::{error, info};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// The port trait for transient user notifications
pub trait NotificationPort: Send + Sync {
    /// Displays a transient notification
    fn notify(&self, level: NotificationLevel, message: &str);
}

/// Notification adapter that forwards to the tracing subscriber
///
/// The default when the hosting application wires no toast surface.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Error => error!(target: "wizard::notify", "{message}"),
            _ => info!(target: "wizard::notify", "{message}"),
        }
    }
}

/// Recording notifier for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Captures notifications in memory for assertions
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        events: Mutex<Vec<(NotificationLevel, String)>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// All notifications recorded so far
        pub fn events(&self) -> Vec<(NotificationLevel, String)> {
            self.events.lock().expect("notifier poisoned").clone()
        }

        /// Whether any recorded notification at `level` contains `needle`
        pub fn contains(&self, level: NotificationLevel, needle: &str) -> bool {
            self.events()
                .iter()
                .any(|(l, m)| *l == level && m.contains(needle))
        }
    }

    impl NotificationPort for RecordingNotifier {
        fn notify(&self, level: NotificationLevel, message: &str) {
            self.events
                .lock()
                .expect("notifier poisoned")
                .push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingNotifier;
    use super::*;

    #[test]
    fn test_recording_notifier_captures_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(NotificationLevel::Info, "loading departments");
        notifier.notify(NotificationLevel::Error, "geo service unreachable");

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, NotificationLevel::Info);
        assert!(notifier.contains(NotificationLevel::Error, "unreachable"));
    }
}
