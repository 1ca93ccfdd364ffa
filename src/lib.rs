// SPDX-License-Identifier: MPL-2.0
//! `pos_toasts` is the toast notification queue of a point-of-sale front-end.
//!
//! It keeps the ordered set of transient messages shown after sales,
//! product edits and sync failures, retires each one when its lifetime
//! elapses or the cashier closes it, and records queue activity in a
//! bounded diagnostics log.

#![doc(html_root_url = "https://docs.rs/pos_toasts/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;
