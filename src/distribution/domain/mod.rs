//! Domain types for lead distribution.

mod error;
mod filter;
mod selection;
mod strategy;

pub use error::{DistributionError, ParseStrategyError};
pub use filter::passes_filters;
pub use selection::{CategoryMatchMode, Selection};
pub use strategy::DistributionStrategy;
