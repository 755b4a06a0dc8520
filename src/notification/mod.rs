//! Fire-and-forget notifications for operation outcomes.
//!
//! Services report one aggregate notification per operation. Presentation is
//! owned by the caller; this module only defines the payload, the
//! [`Notifier`] port and two adapters.

mod adapters;
mod domain;

pub use adapters::{RecordingNotifier, TracingNotifier};
pub use domain::{Notification, Severity};

/// Sink for user-facing notifications.
///
/// Implementations must not block and must not fail: a notification that
/// cannot be delivered is dropped.
pub trait Notifier: Send + Sync {
    /// Publishes a notification.
    fn notify(&self, notification: Notification);
}
