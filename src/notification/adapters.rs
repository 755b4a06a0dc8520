//! Notifier adapters.

use super::{Notification, Notifier, Severity};
use std::sync::{Arc, RwLock};

/// Notifier that writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            description,
            severity,
        } = notification;
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(%severity, %title, %description, "notification");
            }
            Severity::Warning => tracing::warn!(%title, %description, "notification"),
            Severity::Destructive => tracing::error!(%title, %description, "notification"),
        }
    }
}

/// Notifier that keeps every notification in memory.
///
/// Callers that render notifications themselves can drain the queue with
/// [`RecordingNotifier::take`].
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded notification, oldest first.
    #[must_use]
    pub fn recorded(&self) -> Vec<Notification> {
        self.notifications
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Removes and returns every recorded notification.
    #[must_use]
    pub fn take(&self) -> Vec<Notification> {
        self.notifications
            .write()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Returns the most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .read()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notifications.write() {
            guard.push(notification);
        } else {
            tracing::warn!(title = %notification.title, "notification recorder poisoned");
        }
    }
}
