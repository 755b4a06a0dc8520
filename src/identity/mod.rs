//! Caller identity for role-scoped operations.
//!
//! Authentication itself is owned by an external session provider. This
//! module only models what the distribution core consumes from it: the
//! current user identifier, a closed set of roles, and the company a
//! company-role user acts for.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{ParseRoleError, Role, Session, UserId};
pub use ports::{SessionError, SessionProvider, SessionResult};
