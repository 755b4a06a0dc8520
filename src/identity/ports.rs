//! Session provider port.

use super::domain::Session;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session lookups.
pub type SessionResult<T> = Result<T, SessionError>;

/// Access to the caller's authenticated session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current session, or `None` for anonymous callers.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Provider`] when the session provider cannot
    /// be reached.
    async fn current_session(&self) -> SessionResult<Option<Session>>;
}

/// Errors returned by session provider implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The provider failed to resolve the session.
    #[error("session provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionError {
    /// Wraps a provider failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
