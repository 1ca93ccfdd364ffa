// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue for user feedback.
//!
//! Notifications appear temporarily to confirm actions (sale recorded,
//! product saved, sync failed) without blocking interaction, and are retired
//! either when their lifetime elapses or when the user closes them.
//!
//! # Components
//!
//! - [`notification`] - `Notification` record, `Kind` and `Lifetime`
//! - [`timer`] - clocks and cancellable auto-removal timers
//! - [`manager`] - `ToastQueue`, the active sequence and its lifecycle
//! - [`view`] - `ToastView` rows handed to the presentation layer
//! - [`service`] - tokio task hosting a queue behind a cloneable handle
//!
//! # Usage
//!
//! ```
//! use pos_toasts::notifications::{Kind, Lifetime, ManualClock, ToastQueue};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut queue = ToastQueue::with_clock(clock.clone());
//!
//! let id = queue.notify(Kind::Success, "Sale recorded", None, Some(Lifetime::from_millis(100)));
//! assert_eq!(queue.get(id).unwrap().title(), "Success");
//!
//! clock.advance(Duration::from_millis(100));
//! queue.tick();
//! assert!(queue.is_empty());
//! ```
//!
//! # Lifetimes
//!
//! The default lifetime is 5 seconds. `Lifetime::Persistent` keeps a toast
//! until it is dismissed; when lifetimes come in as milliseconds, zero or a
//! negative value means persistent.

pub mod manager;
pub mod notification;
pub mod service;
pub mod timer;
pub mod view;

pub use manager::{Message as NotificationMessage, NotificationSettings, ToastQueue};
pub use notification::{Kind, Lifetime, Notification, NotificationId};
pub use service::{ToastHandle, ToastService, TokioClock};
pub use timer::{Clock, ManualClock, SystemClock, TimerHandle, Timers};
pub use view::ToastView;
