//! Lead assignment and batch distribution.

mod assignment;
mod batch;

pub use assignment::LeadAssignmentService;
pub use batch::{BatchRequest, BatchSummary, LeadBatchProcessor};
