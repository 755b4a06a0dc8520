//! Domain model for leads and lead history.
//!
//! A lead is created with status `new` and no owner. Assignment sets the
//! owning provider and moves the status to `assigned`; nothing in this
//! crate deletes a lead.

mod error;
mod history;
mod ids;
mod lead;
mod metadata;
mod status;

pub use error::{LeadDomainError, ParseAssignmentMethodError, ParseLeadStatusError};
pub use history::{AssignmentMethod, AssignmentRecord, LeadHistoryEntry};
pub use ids::{HistoryEntryId, LeadId};
pub use lead::{Lead, LeadDraft, PersistedLeadData};
pub use metadata::{POSTAL_CODE_KEYS, postal_code};
pub use status::{LeadStatus, PipelineStage};
