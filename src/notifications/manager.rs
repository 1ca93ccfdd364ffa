// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! [`ToastQueue`] owns the active sequence of notifications and their
//! auto-removal timers. Every mutation goes through `push`/`notify`,
//! `dismiss`, `clear_all` or `tick`; nothing else can touch either collection.

use super::notification::{Kind, Lifetime, Notification, NotificationId};
use super::timer::{Clock, SystemClock, TimerHandle, Timers};
use super::view::ToastView;
use crate::config::{NotificationsConfig, DEFAULT_MAX_VISIBLE_TOASTS};
use crate::diagnostics::{DiagnosticsHandle, DismissReason};
use std::collections::VecDeque;
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Fire any auto-removal timers that are due.
    Tick,
    /// Drop every notification.
    ClearAll,
}

/// Queue-wide behaviour, usually built from [`NotificationsConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Lifetime given to notifications that do not set one.
    pub default_lifetime: Lifetime,
    /// Size of the presentation window returned by [`ToastQueue::visible`].
    pub max_visible: usize,
    /// Error notifications without an explicit lifetime stay until dismissed.
    pub persist_errors: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::default(),
            max_visible: DEFAULT_MAX_VISIBLE_TOASTS as usize,
            persist_errors: false,
        }
    }
}

impl From<&NotificationsConfig> for NotificationSettings {
    fn from(config: &NotificationsConfig) -> Self {
        Self {
            default_lifetime: config.default_lifetime(),
            max_visible: config.max_visible() as usize,
            persist_errors: config.persist_errors.unwrap_or(false),
        }
    }
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    timer: Option<TimerHandle>,
}

/// The active notification sequence, oldest first.
#[derive(Debug)]
pub struct ToastQueue<C = SystemClock> {
    active: VecDeque<Entry>,
    timers: Timers,
    settings: NotificationSettings,
    clock: C,
    diagnostics: Option<DiagnosticsHandle>,
}

impl ToastQueue<SystemClock> {
    /// Creates an empty queue on the system clock with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ToastQueue<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ToastQueue<C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self::with_settings(NotificationSettings::default(), clock)
    }

    #[must_use]
    pub fn with_settings(settings: NotificationSettings, clock: C) -> Self {
        Self {
            active: VecDeque::new(),
            timers: Timers::new(),
            settings,
            clock,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for logging queue activity.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Enqueues a new notification and returns its id.
    ///
    /// A missing `title` falls back to the kind's default; a missing
    /// `lifetime` falls back to the queue default.
    pub fn notify(
        &mut self,
        kind: Kind,
        message: impl Into<String>,
        title: Option<&str>,
        lifetime: Option<Lifetime>,
    ) -> NotificationId {
        let mut notification = Notification::new(kind, message);
        if let Some(title) = title {
            notification = notification.with_title(title);
        }
        if let Some(lifetime) = lifetime {
            notification = notification.with_lifetime(lifetime);
        }
        self.push(notification)
    }

    pub fn notify_success(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> NotificationId {
        self.notify(Kind::Success, message, title, None)
    }

    pub fn notify_error(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> NotificationId {
        self.notify(Kind::Error, message, title, None)
    }

    pub fn notify_warning(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> NotificationId {
        self.notify(Kind::Warning, message, title, None)
    }

    pub fn notify_info(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> NotificationId {
        self.notify(Kind::Info, message, title, None)
    }

    /// Appends a prebuilt notification to the tail of the active sequence.
    ///
    /// The record is enqueued under a fresh id, which is returned; pushing
    /// the same notification twice yields two distinct entries. The creation
    /// instant is re-stamped from the queue's clock and the auto-removal
    /// timer is scheduled unless the lifetime is persistent.
    pub fn push(&mut self, notification: Notification) -> NotificationId {
        let now = self.clock.now();
        let fallback = if notification.kind() == Kind::Error && self.settings.persist_errors {
            Lifetime::Persistent
        } else {
            self.settings.default_lifetime
        };
        let notification = notification
            .reissued()
            .created_at_instant(now)
            .resolve_lifetime(fallback);
        let id = notification.id();

        if let Some(handle) = &self.diagnostics {
            if notification.message().is_empty() {
                handle.log_warning(format!("{id} enqueued with an empty message"));
            }
            handle.log_shown(id, notification.kind());
            match notification.kind() {
                Kind::Warning => handle.log_warning(notification.message()),
                Kind::Error => handle.log_error(notification.message()),
                Kind::Success | Kind::Info => {}
            }
        }

        let timer = notification
            .deadline()
            .map(|deadline| self.timers.schedule(id, deadline));
        self.active.push_back(Entry {
            notification,
            timer,
        });
        id
    }

    /// Dismisses a notification by its ID and cancels its timer.
    ///
    /// Returns `true` if the notification was found and removed. Unknown or
    /// already removed ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.remove(id, DismissReason::Manual)
    }

    /// Empties the active sequence and cancels every pending timer.
    pub fn clear_all(&mut self) {
        if let Some(handle) = &self.diagnostics {
            for entry in &self.active {
                handle.log_dismissed(entry.notification.id(), DismissReason::Cleared);
            }
        }
        self.active.clear();
        self.timers.cancel_all();
    }

    /// Removes every notification whose timer is due, returning their ids.
    ///
    /// Should be called whenever time may have passed; calling it again
    /// without time moving changes nothing.
    pub fn tick(&mut self) -> Vec<NotificationId> {
        let now = self.clock.now();
        self.timers
            .pop_expired(now)
            .into_iter()
            .filter(|id| self.remove(*id, DismissReason::Expired))
            .collect()
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => {
                self.tick();
            }
            Message::ClearAll => self.clear_all(),
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) will have work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Active notifications in display order (oldest first).
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|entry| &entry.notification)
    }

    /// The first `max_visible` active notifications.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.active().take(self.settings.max_visible)
    }

    /// Number of active notifications beyond the visible window.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.active.len().saturating_sub(self.settings.max_visible)
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.active().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of auto-removal timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Presentation rows for every active notification.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ToastView> {
        let now = self.clock.now();
        self.active()
            .map(|notification| ToastView::from_notification(notification, now))
            .collect()
    }

    fn remove(&mut self, id: NotificationId, reason: DismissReason) -> bool {
        let Some(pos) = self.active.iter().position(|e| e.notification.id() == id) else {
            return false;
        };
        let Some(entry) = self.active.remove(pos) else {
            return false;
        };
        if let Some(timer) = entry.timer {
            // Already gone when the timer itself fired.
            timer.cancel(&mut self.timers);
        }
        if let Some(handle) = &self.diagnostics {
            handle.log_dismissed(id, reason);
        }
        true
    }
}
