//! Distribution allow-lists and budgets.

use super::SettingsDomainError;
use serde::{Deserialize, Serialize};

/// Allow-lists gating which leads a distribution run may touch.
///
/// An empty list places no constraint on its field. Deserialisation goes
/// through [`DistributionFilters::new`], so stored entries are trimmed and
/// blank ones rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDistributionFilters")]
pub struct DistributionFilters {
    categories: Vec<String>,
    #[serde(rename = "zipCodes")]
    zip_codes: Vec<String>,
    lead_types: Vec<String>,
}

/// Wire shape of [`DistributionFilters`] before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDistributionFilters {
    categories: Vec<String>,
    #[serde(rename = "zipCodes", alias = "zip_codes")]
    zip_codes: Vec<String>,
    lead_types: Vec<String>,
}

impl TryFrom<RawDistributionFilters> for DistributionFilters {
    type Error = SettingsDomainError;

    fn try_from(raw: RawDistributionFilters) -> Result<Self, Self::Error> {
        Self::new(raw.categories, raw.zip_codes, raw.lead_types)
    }
}

impl DistributionFilters {
    /// Builds filters, trimming every entry.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::BlankFilterEntry`] when an entry is
    /// empty after trimming.
    pub fn new(
        categories: impl IntoIterator<Item = String>,
        zip_codes: impl IntoIterator<Item = String>,
        lead_types: impl IntoIterator<Item = String>,
    ) -> Result<Self, SettingsDomainError> {
        Ok(Self {
            categories: clean("categories", categories)?,
            zip_codes: clean("zipCodes", zip_codes)?,
            lead_types: clean("lead_types", lead_types)?,
        })
    }

    /// Allowed categories.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Allowed postal codes.
    #[must_use]
    pub fn zip_codes(&self) -> &[String] {
        &self.zip_codes
    }

    /// Allowed lead types.
    #[must_use]
    pub fn lead_types(&self) -> &[String] {
        &self.lead_types
    }

    /// Returns `true` when no list constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.zip_codes.is_empty() && self.lead_types.is_empty()
    }
}

fn clean(
    list: &'static str,
    entries: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, SettingsDomainError> {
    entries
        .into_iter()
        .map(|entry| {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                Err(SettingsDomainError::BlankFilterEntry { list })
            } else {
                Ok(trimmed.to_owned())
            }
        })
        .collect()
}

/// Spending cap in whole Norwegian kroner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u64);

impl Budget {
    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::ZeroBudget`] for a zero amount.
    pub const fn new(kroner: u64) -> Result<Self, SettingsDomainError> {
        if kroner == 0 {
            return Err(SettingsDomainError::ZeroBudget);
        }
        Ok(Self(kroner))
    }

    /// Returns the amount in kroner.
    #[must_use]
    pub const fn kroner(self) -> u64 {
        self.0
    }
}
