// SPDX-License-Identifier: MPL-2.0
//! Async host for a [`ToastQueue`].
//!
//! The queue lives on a single tokio task. Callers talk to it through a
//! cloneable [`ToastHandle`]; the task sleeps until the next auto-removal
//! deadline or the next command, whichever comes first, so all mutations
//! stay serialized on one logical thread.
//!
//! ```no_run
//! use pos_toasts::notifications::{ToastQueue, ToastService, TokioClock};
//!
//! # async fn demo() -> pos_toasts::error::Result<()> {
//! let (toasts, task) = ToastService::spawn(ToastQueue::with_clock(TokioClock));
//! let id = toasts.notify_success("Sale recorded", None).await?;
//! toasts.dismiss(id).await?;
//! toasts.shutdown().await?;
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

use super::manager::ToastQueue;
use super::notification::{Kind, Lifetime, Notification, NotificationId};
use super::timer::Clock;
use super::view::ToastView;
use crate::error::{Error, Result};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Buffered commands before `ToastHandle` calls start waiting.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Clock backed by tokio's timer, so paused-time tests drive expiry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

enum Command {
    Push {
        notification: Notification,
        reply: oneshot::Sender<NotificationId>,
    },
    Dismiss {
        id: NotificationId,
        reply: oneshot::Sender<bool>,
    },
    ClearAll {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<ToastView>>,
    },
    Shutdown,
}

/// Handle for talking to a running [`ToastService`].
///
/// Cheap to clone. The service stops once every handle is dropped or
/// [`shutdown`](Self::shutdown) is called.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Vec<ToastView>>,
}

impl ToastHandle {
    /// Enqueues a notification and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has ended.
    pub async fn notify(
        &self,
        kind: Kind,
        message: impl Into<String>,
        title: Option<&str>,
        lifetime: Option<Lifetime>,
    ) -> Result<NotificationId> {
        let mut notification = Notification::new(kind, message);
        if let Some(title) = title {
            notification = notification.with_title(title);
        }
        if let Some(lifetime) = lifetime {
            notification = notification.with_lifetime(lifetime);
        }
        self.push(notification).await
    }

    /// Enqueues a prebuilt notification under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has ended.
    pub async fn push(&self, notification: Notification) -> Result<NotificationId> {
        self.request(|reply| Command::Push {
            notification,
            reply,
        })
        .await
    }

    /// Enqueues a success notification with the default lifetime.
    pub async fn notify_success(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> Result<NotificationId> {
        self.notify(Kind::Success, message, title, None).await
    }

    /// Enqueues an error notification with the default lifetime.
    pub async fn notify_error(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> Result<NotificationId> {
        self.notify(Kind::Error, message, title, None).await
    }

    /// Enqueues a warning notification with the default lifetime.
    pub async fn notify_warning(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> Result<NotificationId> {
        self.notify(Kind::Warning, message, title, None).await
    }

    /// Enqueues an informational notification with the default lifetime.
    pub async fn notify_info(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
    ) -> Result<NotificationId> {
        self.notify(Kind::Info, message, title, None).await
    }

    /// Dismisses a notification. Returns `true` if it was still active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has ended.
    pub async fn dismiss(&self, id: NotificationId) -> Result<bool> {
        self.request(|reply| Command::Dismiss { id, reply }).await
    }

    /// Drops every notification and pending timer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has ended.
    pub async fn clear_all(&self) -> Result<()> {
        self.request(|reply| Command::ClearAll { reply }).await
    }

    /// Current presentation rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has ended.
    pub async fn snapshot(&self) -> Result<Vec<ToastView>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Receiver that is updated after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastView>> {
        self.snapshots.clone()
    }

    /// Asks the service to stop. Pending timers are dropped with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service task has already ended.
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| Error::ServiceStopped)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| Error::ServiceStopped)?;
        response.await.map_err(|_| Error::ServiceStopped)
    }
}

/// Owns a [`ToastQueue`] on a tokio task.
///
/// The queue runs on [`TokioClock`] so its deadlines and the task's sleeps
/// share one time source, paused test time included.
pub struct ToastService {
    queue: ToastQueue<TokioClock>,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Vec<ToastView>>,
}

impl ToastService {
    /// Spawns the service on the current tokio runtime.
    pub fn spawn(queue: ToastQueue<TokioClock>) -> (ToastHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(queue.snapshot());
        let service = Self {
            queue,
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(service.run());
        (
            ToastHandle {
                commands: command_tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    async fn run(mut self) {
        loop {
            let deadline = self.queue.next_deadline();
            tokio::select! {
                command = self.commands.recv() => {
                    // Expire first so a command never observes a stale toast.
                    self.queue.tick();
                    match command {
                        Some(Command::Shutdown) | None => break,
                        Some(command) => self.apply(command),
                    }
                }
                () = sleep_until(deadline) => {
                    self.queue.tick();
                }
            }
            self.publish();
        }
        self.queue.clear_all();
        self.publish();
    }

    fn apply(&mut self, command: Command) {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            Command::Push {
                notification,
                reply,
            } => {
                let _ = reply.send(self.queue.push(notification));
            }
            Command::Dismiss { id, reply } => {
                let _ = reply.send(self.queue.dismiss(id));
            }
            Command::ClearAll { reply } => {
                self.queue.clear_all();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.queue.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.queue.snapshot());
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
