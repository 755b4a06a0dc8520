//! Application services for lead intake and the lead read path.

mod intake;
mod query;

pub use intake::{LeadIntakeError, LeadIntakeResult, LeadIntakeService};
pub use query::{LeadQueryError, LeadQueryService};
