//! Form value resolution.
//!
//! Builds the value map the engine renders from: prefilled values for a
//! template's variables, list selections joined into one string, and the
//! required-field check.

use crate::engine::effective_value;
use crate::model::{SenderDetails, ValueMap, VariableDefinition};

/// Separator used to join multiselect items.
pub const SELECTION_SEPARATOR: &str = ", ";

/// Variable ids refreshed from saved sender details.
const DETAIL_IDS: [&str; 3] = ["fullName", "email", "phone"];

/// Initial values for a template's variables.
///
/// Each id takes the first non-empty of: the query value, the matching
/// sender detail, the variable default. Anything else starts empty.
pub fn initial_values(
    variables: &[VariableDefinition],
    query: &ValueMap,
    details: &SenderDetails,
) -> ValueMap {
    variables
        .iter()
        .map(|var| {
            let value = query
                .get(&var.id)
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .or_else(|| details.get(&var.id).filter(|v| !v.is_empty()))
                .or(var.default_value.as_deref())
                .unwrap_or("");
            (var.id.clone(), value.to_string())
        })
        .collect()
}

/// Join picked list items into the single string the engine receives.
pub fn join_selection<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(SELECTION_SEPARATOR)
}

/// Fill empty name/email/phone entries from saved details.
pub fn apply_details(values: &mut ValueMap, details: &SenderDetails) {
    for id in DETAIL_IDS {
        let Some(detail) = details.get(id).filter(|d| !d.is_empty()) else {
            continue;
        };
        let entry = values.entry(id.to_string()).or_default();
        if entry.is_empty() {
            *entry = detail.to_string();
        }
    }
}

/// Required variables that would render empty.
pub fn missing_required<'a>(
    variables: &'a [VariableDefinition],
    values: &ValueMap,
) -> Vec<&'a VariableDefinition> {
    variables
        .iter()
        .filter(|var| var.required && effective_value(var, values).trim().is_empty())
        .collect()
}
