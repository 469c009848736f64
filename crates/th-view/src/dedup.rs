//! Value-based deduplication.
//!
//! Two records are duplicates when their canonical JSON serializations are
//! equal. Object keys are sorted before comparison, so field order never
//! makes two equal records look distinct.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keep the first record of every distinct serialized value, in input order.
///
/// # Errors
///
/// Returns `serde_json::Error` if a record cannot be serialized to JSON.
pub fn dedup_by_value<T>(items: &[T]) -> Result<Vec<T>, serde_json::Error>
where
    T: Serialize + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique = Vec::new();
    for item in items {
        let key = sort_keys(serde_json::to_value(item)?).to_string();
        if seen.insert(key) {
            unique.push(item.clone());
        }
    }
    Ok(unique)
}

/// Serialize `value` with object keys sorted at every depth.
///
/// Keys are re-inserted in sorted order, so the output does not depend on
/// whether `serde_json` keeps maps sorted or in insertion order.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    sort_keys(value.clone()).to_string()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(key, item)| (key, sort_keys(item))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub text: String,
    pub value: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Map records to dropdown options and drop duplicates.
///
/// Records for which `to_option` returns `None` contribute nothing.
///
/// # Errors
///
/// Returns `serde_json::Error` if an option cannot be serialized.
pub fn options_from<T, F>(items: &[T], to_option: F) -> Result<Vec<FilterOption>, serde_json::Error>
where
    F: Fn(&T) -> Option<FilterOption>,
{
    let options: Vec<FilterOption> = items.iter().filter_map(to_option).collect();
    dedup_by_value(&options)
}
