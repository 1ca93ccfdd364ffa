// SPDX-License-Identifier: MPL-2.0
//! Read-only presentation rows.
//!
//! The presentation layer never sees queue internals; it renders a list of
//! [`ToastView`]s and answers with `Message::Dismiss(id)` when the user
//! closes one.

use super::notification::{Kind, Notification, NotificationId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// One rendered toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub id: NotificationId,
    pub kind: Kind,
    pub title: String,
    pub message: String,
    /// Milliseconds until auto-removal, `None` for persistent toasts.
    pub remaining_ms: Option<u64>,
    pub issued_at: DateTime<Utc>,
}

impl ToastView {
    #[must_use]
    pub fn from_notification(notification: &Notification, now: Instant) -> Self {
        Self {
            id: notification.id(),
            kind: notification.kind(),
            title: notification.title().to_string(),
            message: notification.message().to_string(),
            remaining_ms: notification
                .remaining(now)
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            issued_at: notification.issued_at(),
        }
    }

    /// Whether the presentation layer should offer a close button only.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.remaining_ms.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::notification::Lifetime;
    use std::time::Duration;

    #[test]
    fn view_copies_display_fields() {
        let now = Instant::now();
        let n = Notification::warning("Stock below threshold")
            .with_title("Inventory")
            .with_lifetime(Lifetime::from_millis(2000))
            .created_at_instant(now);

        let view = ToastView::from_notification(&n, now + Duration::from_millis(500));
        assert_eq!(view.id, n.id());
        assert_eq!(view.kind, Kind::Warning);
        assert_eq!(view.title, "Inventory");
        assert_eq!(view.message, "Stock below threshold");
        assert_eq!(view.remaining_ms, Some(1500));
        assert!(!view.is_persistent());
    }

    #[test]
    fn persistent_view_has_no_remaining_time() {
        let n = Notification::error("Sync failed").with_lifetime(Lifetime::Persistent);
        let view = ToastView::from_notification(&n, Instant::now());
        assert!(view.is_persistent());
        assert_eq!(view.title, "Error");
    }

    #[test]
    fn view_serializes_kind_as_lowercase() {
        let n = Notification::info("hello").with_lifetime(Lifetime::Persistent);
        let view = ToastView::from_notification(&n, Instant::now());
        let encoded = toml::to_string(&view).expect("serialize view");
        assert!(encoded.contains("kind = \"info\""));
        assert!(encoded.contains("title = \"Information\""));
    }
}
