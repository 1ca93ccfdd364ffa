// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its `Kind`, and the
//! `Lifetime` that decides when it is retired automatically.

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
///
/// Identifiers come from a process-wide counter and are never reused, so a
/// stale timer can never match a notification created after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// What a notification reports. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Operation failed.
    Error,
    /// Something worth attention that did not block the operation.
    Warning,
    /// Neutral information.
    Info,
}

impl Kind {
    /// Returns every kind, in declaration order.
    #[must_use]
    pub fn all() -> [Kind; 4] {
        [Kind::Success, Kind::Error, Kind::Warning, Kind::Info]
    }

    /// Title used when the caller does not supply one.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Kind::Success => "Success",
            Kind::Error => "Error",
            Kind::Warning => "Warning",
            Kind::Info => "Information",
        }
    }

    /// Lowercase name, as used in config files and serialized snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Kind::Success),
            "error" => Ok(Kind::Error),
            "warning" => Ok(Kind::Warning),
            "info" => Ok(Kind::Info),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// How long a notification stays in the active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Removed automatically once the duration has elapsed.
    Timed(Duration),
    /// Stays until dismissed manually.
    Persistent,
}

impl Lifetime {
    /// Builds a timed lifetime. A zero duration means `Persistent`.
    #[must_use]
    pub fn timed(duration: Duration) -> Self {
        if duration.is_zero() {
            Lifetime::Persistent
        } else {
            Lifetime::Timed(duration)
        }
    }

    /// Converts a millisecond count. Zero or negative values mean `Persistent`.
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        match u64::try_from(ms) {
            Ok(ms) if ms > 0 => Lifetime::Timed(Duration::from_millis(ms)),
            _ => Lifetime::Persistent,
        }
    }

    /// Millisecond form, `0` for `Persistent`.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        match self {
            Lifetime::Timed(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Lifetime::Persistent => 0,
        }
    }

    /// Returns the duration, or `None` when persistent.
    ///
    /// A zero `Timed` duration counts as persistent, however it was built.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Lifetime::Timed(d) if !d.is_zero() => Some(d),
            _ => None,
        }
    }

    /// Returns `true` if this lifetime never expires on its own.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.duration().is_none()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Lifetime::Timed(Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS))
    }
}

/// A notification to be displayed to the user.
///
/// Immutable once built; the queue only ever inserts or removes whole records.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    title: Option<String>,
    message: String,
    /// `None` means "use the queue's default".
    lifetime: Option<Lifetime>,
    created_at: Instant,
    issued_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new notification with the given kind and message body.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: None,
            message: message.into(),
            lifetime: None,
            created_at: Instant::now(),
            issued_at: Utc::now(),
        }
    }

    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    /// Creates a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Warning, message)
    }

    /// Creates an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Info, message)
    }

    /// Overrides the kind's default title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets an explicit lifetime, overriding the queue default.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Stamps the creation instant. Used by the queue so that timing follows
    /// its clock rather than the wall clock.
    pub(crate) fn created_at_instant(mut self, now: Instant) -> Self {
        self.created_at = now;
        self
    }

    /// Gives the record a fresh id. The queue calls this on every push, so
    /// enqueueing the same prebuilt notification twice yields two ids.
    pub(crate) fn reissued(mut self) -> Self {
        self.id = NotificationId::new();
        self
    }

    /// Fills in the lifetime if the caller left it unset.
    pub(crate) fn resolve_lifetime(mut self, fallback: Lifetime) -> Self {
        self.lifetime.get_or_insert(fallback);
        self
    }

    /// Identifier of this record. Changes when the record is enqueued.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Notification kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the explicit title, or the kind's default.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.kind.default_title())
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resolved lifetime (the default one if none was set).
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime.unwrap_or_default()
    }

    /// Returns whether a lifetime was set explicitly.
    #[must_use]
    pub fn has_explicit_lifetime(&self) -> bool {
        self.lifetime.is_some()
    }

    /// Monotonic creation instant, as stamped by the queue's clock.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Wall-clock creation time.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Instant at which this notification expires, if it ever does.
    ///
    /// A duration too large to represent as an `Instant` never expires.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.lifetime()
            .duration()
            .and_then(|d| self.created_at.checked_add(d))
    }

    /// Time left before expiry as seen from `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn notification_ids_increase() {
        let a = NotificationId::new();
        let b = NotificationId::new();
        assert!(b > a);
    }

    #[test]
    fn id_display_is_prefixed() {
        let id = NotificationId::new();
        assert_eq!(id.to_string(), format!("toast-{}", id.value()));
    }

    #[test]
    fn default_titles_per_kind() {
        assert_eq!(Kind::Success.default_title(), "Success");
        assert_eq!(Kind::Error.default_title(), "Error");
        assert_eq!(Kind::Warning.default_title(), "Warning");
        assert_eq!(Kind::Info.default_title(), "Information");
    }

    #[test]
    fn title_falls_back_to_kind_default() {
        assert_eq!(Notification::error("x").title(), "Error");
        assert_eq!(
            Notification::error("x").with_title("Payment failed").title(),
            "Payment failed"
        );
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("SUCCESS".parse::<Kind>().unwrap(), Kind::Success);
        assert_eq!(" info ".parse::<Kind>().unwrap(), Kind::Info);
        assert!(matches!(
            "fatal".parse::<Kind>(),
            Err(Error::UnknownKind(k)) if k == "fatal"
        ));
    }

    #[test]
    fn kind_display_round_trips_through_from_str() {
        for kind in Kind::all() {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn lifetime_from_millis_treats_non_positive_as_persistent() {
        assert_eq!(Lifetime::from_millis(0), Lifetime::Persistent);
        assert_eq!(Lifetime::from_millis(-1), Lifetime::Persistent);
        assert_eq!(
            Lifetime::from_millis(250),
            Lifetime::Timed(Duration::from_millis(250))
        );
    }

    #[test]
    fn zero_duration_is_persistent() {
        assert!(Lifetime::timed(Duration::ZERO).is_persistent());
        assert!(!Lifetime::timed(Duration::from_millis(1)).is_persistent());
    }

    #[test]
    fn default_lifetime_is_five_seconds() {
        assert_eq!(
            Lifetime::default(),
            Lifetime::Timed(Duration::from_millis(5000))
        );
        assert_eq!(Lifetime::default().as_millis(), 5000);
        assert_eq!(Lifetime::Persistent.as_millis(), 0);
    }

    #[test]
    fn resolve_lifetime_keeps_explicit_value() {
        let n = Notification::info("x")
            .with_lifetime(Lifetime::Persistent)
            .resolve_lifetime(Lifetime::from_millis(100));
        assert_eq!(n.lifetime(), Lifetime::Persistent);

        let n = Notification::info("x").resolve_lifetime(Lifetime::from_millis(100));
        assert_eq!(n.lifetime(), Lifetime::from_millis(100));
    }

    #[test]
    fn deadline_and_remaining_follow_creation_instant() {
        let start = Instant::now();
        let n = Notification::success("saved")
            .with_lifetime(Lifetime::from_millis(100))
            .created_at_instant(start);

        assert_eq!(n.deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(
            n.remaining(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            n.remaining(start + Duration::from_millis(500)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn zero_timed_variant_is_persistent() {
        let zero = Lifetime::Timed(Duration::ZERO);
        assert!(zero.is_persistent());
        assert!(zero.duration().is_none());
        assert_eq!(zero.as_millis(), 0);
        assert!(Notification::info("x").with_lifetime(zero).deadline().is_none());
    }

    #[test]
    fn unrepresentable_deadline_never_expires() {
        let n = Notification::info("x").with_lifetime(Lifetime::timed(Duration::MAX));
        assert!(!n.lifetime().is_persistent());
        assert!(n.deadline().is_none());
        assert!(n.remaining(Instant::now()).is_none());
    }

    #[test]
    fn reissued_notification_gets_a_new_id() {
        let n = Notification::warning("x");
        let copy = n.clone().reissued();
        assert_ne!(n.id(), copy.id());
        assert_eq!(copy.message(), "x");
    }

    #[test]
    fn persistent_notification_has_no_deadline() {
        let n = Notification::error("boom").with_lifetime(Lifetime::Persistent);
        assert!(n.deadline().is_none());
        assert!(n.remaining(Instant::now()).is_none());
    }

    #[test]
    fn notification_constructors_set_correct_kind() {
        assert_eq!(Notification::success("").kind(), Kind::Success);
        assert_eq!(Notification::info("").kind(), Kind::Info);
        assert_eq!(Notification::warning("").kind(), Kind::Warning);
        assert_eq!(Notification::error("").kind(), Kind::Error);
    }
}
