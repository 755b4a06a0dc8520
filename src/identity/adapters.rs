//! Session provider adapters.

use super::{
    domain::Session,
    ports::{SessionProvider, SessionResult},
};
use async_trait::async_trait;

/// Session provider that always returns a fixed session.
///
/// Suits service accounts and callers that resolve the session up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    session: Option<Session>,
}

impl StaticSessionProvider {
    /// Creates a provider returning `session`.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Creates a provider for anonymous callers.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        Ok(self.session.clone())
    }
}
