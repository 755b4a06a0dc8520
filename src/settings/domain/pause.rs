//! Pause state and its legacy boolean encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether automatic distribution may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseState {
    /// Distribution runs normally.
    #[default]
    Active,
    /// Every distribution run is suspended.
    PausedGlobally,
    /// Automatic hand-off to provider agents is suspended.
    PausedForAgents,
}

impl PauseState {
    /// Returns `true` for either paused state.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PausedGlobally => "paused_globally",
            Self::PausedForAgents => "paused_for_agents",
        }
    }
}

impl fmt::Display for PauseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three overlapping booleans older settings rows carry.
///
/// Only read, never written: [`LegacyPauseFlags::collapse`] folds them into
/// a [`PauseState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyPauseFlags {
    /// Older spelling of the global pause switch.
    pub global_pause: Option<bool>,
    /// Newer spelling of the global pause switch.
    pub globally_paused: Option<bool>,
    /// Agent hand-off switch.
    pub agents_paused: Option<bool>,
}

impl LegacyPauseFlags {
    /// Folds the flags into a single state. Either global spelling wins over
    /// the agent flag.
    #[must_use]
    pub fn collapse(self) -> PauseState {
        let global = self.global_pause.unwrap_or(false) || self.globally_paused.unwrap_or(false);
        if global {
            PauseState::PausedGlobally
        } else if self.agents_paused.unwrap_or(false) {
            PauseState::PausedForAgents
        } else {
            PauseState::Active
        }
    }
}
