//! In-memory lead adapters.

mod history;
mod lead;

pub use history::InMemoryLeadHistory;
pub use lead::InMemoryLeadRepository;
