//! Settings-driven lead gate.

use crate::lead::domain::Lead;
use crate::settings::domain::LeadSettings;

/// Decides whether `lead` may be distributed under `settings`.
///
/// Absent settings or absent filters accept everything. A lead whose status
/// is not recognised is always rejected when filters are present. Each
/// non-empty allow-list must contain the corresponding lead field, except
/// postal codes: a lead without a postal code in its metadata is not
/// rejected by that list. Categories compare trimmed and case-insensitively,
/// the same way the category matcher reads them.
#[must_use]
pub fn passes_filters(lead: &Lead, settings: Option<&LeadSettings>) -> bool {
    let Some(filters) = settings.and_then(LeadSettings::active_filters) else {
        return true;
    };
    if lead.status().is_none() {
        return false;
    }
    if !allows_category(filters.categories(), lead.category()) {
        return false;
    }
    if !allows(filters.lead_types(), lead.lead_type()) {
        return false;
    }
    if filters.zip_codes().is_empty() {
        return true;
    }
    lead.postal_code()
        .is_none_or(|code| filters.zip_codes().contains(&code))
}

fn allows(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|entry| entry == value)
}

fn allows_category(allowed: &[String], category: &str) -> bool {
    let wanted = category.trim().to_lowercase();
    allowed.is_empty() || allowed.iter().any(|entry| entry.to_lowercase() == wanted)
}
