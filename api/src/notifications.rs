//! User-facing notifications (toasts).

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumIs)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Surfaces short messages to the user.
pub trait NotificationSink {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str);

    fn success(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Success, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Error, title, message);
    }
}
