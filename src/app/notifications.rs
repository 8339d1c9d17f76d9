//! User-facing notifications (toasts).
//!
//! The search session never talks to the renderer directly. It reports outcomes
//! through the [`NotificationSink`] trait, which the plugin implements with a
//! small bounded [`Toasts`] stack. Toasts expire after a configurable timeout and
//! can be dismissed by the user.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// Maximum number of toasts kept on screen at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational message (e.g. result count).
    Info,
    /// Failure or empty result.
    Error,
}

/// Fire-and-forget sink for user-visible messages.
///
/// Implementations must not fail and give no acknowledgment.
pub trait NotificationSink {
    /// Publishes `message` with the given severity.
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// One toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of toasts, oldest first.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: VecDeque<Notification>,
    timeout: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::seconds(4))
    }
}

impl Toasts {
    /// Creates an empty toast stack whose entries live for `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            items: VecDeque::with_capacity(MAX_VISIBLE_TOASTS),
            timeout,
        }
    }

    /// Returns the toasts currently on screen, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Seconds until the oldest toast expires, or `None` when nothing is shown.
    ///
    /// Already-expired toasts report `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_expiry_secs(&self, now: DateTime<Utc>) -> Option<f64> {
        let oldest = self.items.iter().map(|toast| toast.created_at).min()?;
        let remaining = self.timeout - (now - oldest);
        Some(remaining.num_milliseconds().max(0) as f64 / 1000.0)
    }

    /// Pushes a toast created at `now`, evicting the oldest one when full.
    pub fn push_at(&mut self, message: &str, kind: NotificationKind, now: DateTime<Utc>) {
        if self.items.len() == MAX_VISIBLE_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            message: message.to_string(),
            kind,
            created_at: now,
        });
    }

    /// Removes the newest toast. Returns `false` if there was nothing to dismiss.
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop_back().is_some()
    }

    /// Drops every toast older than the timeout. Returns `true` if any were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.items.len();
        let timeout = self.timeout;
        self.items.retain(|toast| now - toast.created_at < timeout);
        before != self.items.len()
    }
}

impl NotificationSink for Toasts {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Info => tracing::info!(message = %message, "notification"),
            NotificationKind::Error => tracing::warn!(message = %message, "error notification"),
        }
        self.push_at(message, kind, Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut toasts = Toasts::new(Duration::seconds(4));
        for i in 0..5 {
            toasts.push_at(&format!("t{i}"), NotificationKind::Info, at(0));
        }
        let messages: Vec<&str> = toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_expire_removes_only_old_toasts() {
        let mut toasts = Toasts::new(Duration::seconds(4));
        toasts.push_at("old", NotificationKind::Error, at(0));
        toasts.push_at("new", NotificationKind::Info, at(3));

        assert!(!toasts.expire(at(2)));
        assert!(toasts.expire(at(5)));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().message, "new");
    }

    #[test]
    fn test_dismiss_latest() {
        let mut toasts = Toasts::default();
        assert!(!toasts.dismiss_latest());
        toasts.notify("hello", NotificationKind::Info);
        assert!(toasts.dismiss_latest());
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_next_expiry_follows_oldest_toast() {
        let mut toasts = Toasts::new(Duration::milliseconds(2500));
        assert_eq!(toasts.next_expiry_secs(at(0)), None);

        toasts.push_at("first", NotificationKind::Info, at(0));
        toasts.push_at("second", NotificationKind::Info, at(1));
        assert_eq!(toasts.next_expiry_secs(at(0)), Some(2.5));
        assert_eq!(toasts.next_expiry_secs(at(2)), Some(0.5));
        assert_eq!(toasts.next_expiry_secs(at(10)), Some(0.0));

        toasts.expire(at(3));
        assert_eq!(toasts.next_expiry_secs(at(3)), Some(0.5));
    }
}
