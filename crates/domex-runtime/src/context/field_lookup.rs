//! Field Lookup Utilities
//!
//! Navigates nested records with dot-notation paths.

use super::Record;
use domex_core::Value;

/// Follow `path` through a record.
///
/// Returns `None` as soon as a segment is missing, which callers treat as an
/// unresolvable reference. A present null is returned as `Some(Value::Null)`.
/// Numeric segments index into arrays.
pub(crate) fn lookup_path<'a>(data: &'a Record, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;

    let mut current = match data.get(*first) {
        Some(v) => v,
        None => {
            tracing::debug!("Field not found: {}", first);
            return None;
        }
    };

    for segment in rest {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))?,
            _ => {
                tracing::debug!("Cannot access '{}' on a non-object value", segment);
                return None;
            }
        };
    }

    Some(current)
}
