//! Step definitions for lead distribution BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
