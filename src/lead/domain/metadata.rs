//! Helpers for the open-ended lead metadata bag.

use serde_json::{Map, Value};

/// Metadata keys that may hold a postal code, in lookup order.
pub const POSTAL_CODE_KEYS: [&str; 4] = ["postal_code", "zip_code", "zipCode", "postcode"];

/// Extracts the postal code from lead metadata.
///
/// The first key in [`POSTAL_CODE_KEYS`] holding a non-blank string or a
/// number wins. Whole numbers are left-padded to the four digits of a
/// Norwegian postal code. Returns `None` when no key carries a usable value.
#[must_use]
pub fn postal_code(metadata: &Map<String, Value>) -> Option<String> {
    POSTAL_CODE_KEYS
        .iter()
        .find_map(|key| metadata.get(*key).and_then(postal_code_value))
}

fn postal_code_value(value: &Value) -> Option<String> {
    match value {
        Value::String(code) => {
            let trimmed = code.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(
            number
                .as_u64()
                .map_or_else(|| number.to_string(), |digits| format!("{digits:04}")),
        ),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
