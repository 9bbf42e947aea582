//! Sort keys and document ordering.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::filter::lookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction {
    Direction::Asc
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: Direction::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: Direction::Desc }
    }
}

/// Parse a comma-separated sort list. A leading `-` sorts that field descending.
/// Blank segments are skipped.
pub fn parse_sort(raw: &str) -> Vec<SortKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "-")
        .map(|s| match s.strip_prefix('-') {
            Some(field) => SortKey::desc(field),
            None => SortKey::asc(s),
        })
        .collect()
}

/// Compare two documents by a list of sort keys, first key first.
pub fn compare_documents(a: &Value, b: &Value, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = compare_values(lookup(a, &key.field), lookup(b, &key.field));
        let ord = match key.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Missing and null values sort before everything else; mixed types sort by type rank.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            // Timestamps serialize with variable fractional digits.
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(dx), Ok(dy)) => dx.cmp(&dy),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_directions() {
        let keys = parse_sort("-featured, order,,");
        assert_eq!(keys, vec![SortKey::desc("featured"), SortKey::asc("order")]);
    }

    #[test]
    fn orders_featured_first_then_by_order() {
        let keys = vec![SortKey::desc("featured"), SortKey::asc("order")];
        let mut docs = vec![
            json!({"t": "c", "featured": false, "order": 0}),
            json!({"t": "b", "featured": true, "order": 2}),
            json!({"t": "a", "featured": true, "order": 1}),
        ];
        docs.sort_by(|a, b| compare_documents(a, b, &keys));
        let titles: Vec<_> = docs.iter().map(|d| d["t"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let keys = vec![SortKey::desc("createdAt")];
        let older = json!({"createdAt": "2024-01-01T00:00:00.5Z"});
        let newer = json!({"createdAt": "2024-01-01T00:00:00.51Z"});
        assert_eq!(compare_documents(&newer, &older, &keys), Ordering::Less);
    }

    #[test]
    fn missing_values_sort_first_ascending() {
        let keys = vec![SortKey::asc("order")];
        assert_eq!(
            compare_documents(&json!({}), &json!({"order": 0}), &keys),
            Ordering::Less
        );
    }
}
