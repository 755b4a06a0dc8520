//! Validation rules for lead query options.

use super::{AssignedFilter, DateRangeOptions, LeadQueryOptions, QueryValidationError};
use crate::lead::ports::{LeadListFilter, OwnerConstraint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Punctuation accepted in search terms besides letters, digits and spaces.
pub const SEARCH_PUNCTUATION: [char; 12] =
    ['-', '_', '.', ',', '\'', '&', '@', '/', '(', ')', '+', ':'];

/// Limits applied while validating query options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Maximum number of postal codes per query.
    pub max_zip_codes: usize,
    /// Minimum digits in a postal code.
    pub min_zip_digits: usize,
    /// Maximum digits in a postal code.
    pub max_zip_digits: usize,
    /// Maximum characters in a trimmed search term.
    pub max_search_chars: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_zip_codes: 50,
            min_zip_digits: 3,
            max_zip_digits: 6,
            max_search_chars: 64,
        }
    }
}

/// Query options that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedLeadQuery {
    /// Status values to include.
    pub statuses: Vec<String>,
    /// Categories to include.
    pub categories: Vec<String>,
    /// Lead types to include.
    pub lead_types: Vec<String>,
    /// Postal codes to include.
    pub zip_codes: Vec<String>,
    /// Trimmed search term.
    pub search_term: Option<String>,
    /// Inclusive lower bound on creation time.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time.
    pub created_to: Option<DateTime<Utc>>,
    /// Assignment state filter.
    pub assigned: AssignedFilter,
}

impl ValidatedLeadQuery {
    /// Builds the store filter, applying `owner` and sanitising the search.
    #[must_use]
    pub fn into_list_filter(self, owner: Option<OwnerConstraint>) -> LeadListFilter {
        LeadListFilter {
            owner,
            statuses: self.statuses,
            categories: self.categories,
            lead_types: self.lead_types,
            zip_codes: self.zip_codes,
            search: self.search_term.as_deref().and_then(sanitize_search_term),
            created_from: self.created_from,
            created_to: self.created_to,
            assigned: self.assigned,
        }
    }
}

/// Validates raw options against `limits`.
///
/// Every field is checked and all failures are reported together.
///
/// # Errors
///
/// Returns [`QueryValidationError`] describing every rule that failed.
pub fn validate(
    options: LeadQueryOptions,
    limits: &QueryLimits,
) -> Result<ValidatedLeadQuery, QueryValidationError> {
    let LeadQueryOptions {
        status,
        category,
        lead_type,
        zip_codes,
        search_term,
        date_range,
        assigned,
    } = options;

    let mut errors = Vec::new();

    errors.extend(validate_zip_codes(&zip_codes, limits));

    let trimmed_search = search_term.as_deref().map(str::trim).and_then(|term| {
        collect(
            &mut errors,
            validate_search_term(term, limits).map(|()| term.to_owned()),
        )
    });

    let DateRangeOptions { from, to } = date_range.unwrap_or_default();
    let created_from = collect(&mut errors, parse_bound("from", from.as_deref()));
    let created_to = collect(&mut errors, parse_bound("to", to.as_deref()));

    let assigned_filter = collect(
        &mut errors,
        assigned
            .as_deref()
            .map_or(Ok(AssignedFilter::All), AssignedFilter::try_from),
    );

    if let Some(err) = QueryValidationError::combine(errors) {
        return Err(err);
    }

    Ok(ValidatedLeadQuery {
        statuses: status,
        categories: category,
        lead_types: lead_type,
        zip_codes,
        search_term: trimmed_search,
        created_from: created_from.flatten(),
        created_to: created_to.flatten(),
        assigned: assigned_filter.unwrap_or_default(),
    })
}

/// Prepares a validated search term for the store's disjunctive filter.
///
/// Commas separate branches in that filter syntax, so they are removed;
/// whitespace runs collapse to a single space. Returns `None` when nothing
/// is left.
#[must_use]
pub fn sanitize_search_term(term: &str) -> Option<String> {
    let without_commas: String = term.chars().filter(|c| *c != ',').collect();
    let collapsed = without_commas.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn collect<T>(
    errors: &mut Vec<QueryValidationError>,
    result: Result<T, QueryValidationError>,
) -> Option<T> {
    result.map_err(|err| errors.push(err)).ok()
}

fn validate_zip_codes(zip_codes: &[String], limits: &QueryLimits) -> Vec<QueryValidationError> {
    let mut errors = Vec::new();
    if zip_codes.len() > limits.max_zip_codes {
        errors.push(QueryValidationError::TooManyZipCodes {
            max: limits.max_zip_codes,
            actual: zip_codes.len(),
        });
    }
    let digit_range = limits.min_zip_digits..=limits.max_zip_digits;
    errors.extend(
        zip_codes
            .iter()
            .filter(|code| {
                !(digit_range.contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit()))
            })
            .map(|code| QueryValidationError::InvalidZipCode(code.clone())),
    );
    errors
}

fn validate_search_term(term: &str, limits: &QueryLimits) -> Result<(), QueryValidationError> {
    let length = term.chars().count();
    if length == 0 {
        return Err(QueryValidationError::EmptySearchTerm);
    }
    if length > limits.max_search_chars {
        return Err(QueryValidationError::SearchTermTooLong {
            max: limits.max_search_chars,
            actual: length,
        });
    }
    term.chars()
        .find(|c| !is_search_char(*c))
        .map_or(Ok(()), |invalid| {
            Err(QueryValidationError::InvalidSearchCharacter(invalid))
        })
}

fn is_search_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || c.is_whitespace() || SEARCH_PUNCTUATION.contains(&c)
}

fn parse_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, QueryValidationError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| QueryValidationError::InvalidDateTime {
                    field,
                    value: raw.to_owned(),
                })
        })
        .transpose()
}
