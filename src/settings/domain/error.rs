//! Error types for settings validation.

use thiserror::Error;

/// Errors returned while constructing settings values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsDomainError {
    /// An allow-list contains a blank entry.
    #[error("{list} filter contains a blank entry")]
    BlankFilterEntry {
        /// Name of the offending list.
        list: &'static str,
    },

    /// A budget of zero was supplied.
    #[error("budget must be greater than zero")]
    ZeroBudget,

    /// `pause` was called with [`super::PauseState::Active`].
    #[error("pause requires a paused state")]
    NotAPauseState,
}
