// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate.

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default toast lifetime in milliseconds.
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5000;

/// Default number of toasts shown at once.
pub const DEFAULT_MAX_VISIBLE_TOASTS: u32 = 3;

/// Minimum number of toasts shown at once.
pub const MIN_MAX_VISIBLE_TOASTS: u32 = 1;

/// Maximum number of toasts shown at once.
pub const MAX_MAX_VISIBLE_TOASTS: u32 = 10;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 200;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_bounds_are_ordered() {
        assert!(MIN_MAX_VISIBLE_TOASTS <= DEFAULT_MAX_VISIBLE_TOASTS);
        assert!(DEFAULT_MAX_VISIBLE_TOASTS <= MAX_MAX_VISIBLE_TOASTS);
    }

    #[test]
    fn diagnostics_bounds_are_ordered() {
        assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY <= DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }

    #[test]
    fn default_duration_is_positive() {
        assert!(DEFAULT_NOTIFICATION_DURATION_MS > 0);
    }
}
