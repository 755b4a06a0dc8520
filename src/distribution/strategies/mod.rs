//! Provider selection strategies and the factory that dispatches to them.
//!
//! Selectors only read. Advancing a provider's fairness timestamp is the
//! job of the assignment service once the lead write has succeeded.

mod category_match;
mod factory;
mod round_robin;
mod selector;

pub use category_match::CategoryMatchSelector;
pub use factory::StrategyFactory;
pub use round_robin::RoundRobinSelector;
pub use selector::{ProviderSelector, SelectionResult};
