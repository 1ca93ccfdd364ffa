// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification activity.

use crate::notifications::{Kind, NotificationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a notification left the active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Closed by the user or by calling code.
    Manual,
    /// Its lifetime elapsed.
    Expired,
    /// Removed by `clear_all`.
    Cleared,
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DismissReason::Manual => "dismissed",
            DismissReason::Expired => "expired",
            DismissReason::Cleared => "cleared",
        };
        f.write_str(label)
    }
}

/// A single diagnostic event.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// Wall-clock time the event was recorded.
    pub timestamp: DateTime<Utc>,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification entered the active sequence.
    NotificationShown { id: NotificationId, kind: Kind },

    /// A notification left the active sequence.
    NotificationDismissed {
        id: NotificationId,
        reason: DismissReason,
    },

    /// Non-critical warning.
    Warning { message: String },

    /// Operation failure reported to the user.
    Error { message: String },
}

impl fmt::Display for DiagnosticEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEventKind::NotificationShown { id, kind } => {
                write!(f, "{id} shown ({kind})")
            }
            DiagnosticEventKind::NotificationDismissed { id, reason } => {
                write!(f, "{id} {reason}")
            }
            DiagnosticEventKind::Warning { message } => write!(f, "warning: {message}"),
            DiagnosticEventKind::Error { message } => write!(f, "error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_display_is_readable() {
        let id = NotificationId::new();
        let shown = DiagnosticEventKind::NotificationShown {
            id,
            kind: Kind::Warning,
        };
        assert_eq!(shown.to_string(), format!("{id} shown (warning)"));

        let gone = DiagnosticEventKind::NotificationDismissed {
            id,
            reason: DismissReason::Expired,
        };
        assert_eq!(gone.to_string(), format!("{id} expired"));
    }

    #[test]
    fn event_kind_serializes_with_type_tag() {
        let event = DiagnosticEventKind::Error {
            message: "card declined".into(),
        };
        let encoded = toml::to_string(&event).expect("serialize event");
        assert!(encoded.contains("type = \"error\""));
        assert!(encoded.contains("message = \"card declined\""));
    }
}
