//! Leadhub: lead distribution for a service marketplace.
//!
//! Visitors submit service requests (leads). Leadhub decides which provider
//! company receives each one, keeps an audit trail of every assignment, and
//! serves a validated, role-scoped read path over the lead pool.
//!
//! The crate follows hexagonal architecture. Every feature module carries
//! its own domain types, port traits, adapters and services:
//!
//! - [`lead`]: the lead aggregate, assignment history and the query path
//! - [`provider`]: provider companies and their fairness timestamps
//! - [`settings`]: versioned distribution settings per scope
//! - [`distribution`]: strategies, single-lead assignment and batch runs
//! - [`saved_filter`]: named lead filter presets per user
//! - [`identity`]: sessions and roles
//! - [`notification`]: user-facing run outcomes
//!
//! [`config`] and [`retry`] hold the shared runtime knobs.

pub mod config;
pub mod distribution;
pub mod identity;
pub mod lead;
pub mod notification;
pub mod provider;
pub mod retry;
pub mod saved_filter;
pub mod settings;
