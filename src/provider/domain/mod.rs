//! Domain model for lead-receiving providers.

mod error;
mod ids;
mod provider;
mod status;

pub use error::{ParseProviderStatusError, ProviderDomainError};
pub use ids::ProviderId;
pub use provider::{PersistedProviderData, Provider};
pub use status::ProviderStatus;
