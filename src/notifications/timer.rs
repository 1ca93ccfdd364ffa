// SPDX-License-Identifier: MPL-2.0
//! Auto-removal timers.
//!
//! Timers are plain deadline records owned by the queue rather than closures
//! capturing queue state. The queue asks [`Timers::pop_expired`] which
//! notifications are due whenever its host ticks it, and a [`TimerHandle`]
//! cancels exactly the timer it was issued for.

use super::notification::NotificationId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of "now" for the queue.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one copy and hand the
/// other to the queue.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.offset_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Time elapsed since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

/// Ordering key: deadline first, then scheduling order for equal deadlines.
type TimerKey = (Instant, u64);

/// Cancellable handle for one scheduled auto-removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    key: TimerKey,
    id: NotificationId,
}

impl TimerHandle {
    /// Notification this timer will remove.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.key.0
    }

    /// Cancels the timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(self, timers: &mut Timers) -> bool {
        timers.cancel(self)
    }
}

/// Pending auto-removal timers, ordered by deadline.
#[derive(Debug, Default)]
pub struct Timers {
    pending: BTreeMap<TimerKey, NotificationId>,
    next_seq: u64,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules removal of `id` at `deadline`.
    pub fn schedule(&mut self, id: NotificationId, deadline: Instant) -> TimerHandle {
        let key = (deadline, self.next_seq);
        self.next_seq += 1;
        self.pending.insert(key, id);
        TimerHandle { key, id }
    }

    /// Cancels the timer behind `handle`.
    ///
    /// The entry is only removed if it still belongs to the same notification.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.get(&handle.key) {
            Some(id) if *id == handle.id => self.pending.remove(&handle.key).is_some(),
            _ => false,
        }
    }

    /// Drops every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns the ids of every timer due at `now`, earliest first.
    pub fn pop_expired(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > now {
                break;
            }
            expired.push(entry.remove());
        }
        expired
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
