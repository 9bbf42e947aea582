//! Field projection for listing responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Internal revision field maintained by the store.
pub const VERSION_FIELD: &str = "__v";

/// Identifier field, always kept by include projections.
const ID_FIELD: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Keep only the named top-level fields (plus `id`).
    Include(Vec<String>),
    /// Drop the named top-level fields.
    Exclude(Vec<String>),
}

impl Default for Projection {
    fn default() -> Self {
        Self::Exclude(vec![VERSION_FIELD.to_string()])
    }
}

impl Projection {
    /// Parse a comma-separated include list. An empty list yields the default.
    pub fn parse(raw: &str) -> Self {
        let fields: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if fields.is_empty() {
            Self::default()
        } else {
            Self::Include(fields)
        }
    }

    pub fn apply(&self, doc: Value) -> Value {
        let Value::Object(map) = doc else { return doc };
        let projected: Map<String, Value> = match self {
            Self::Include(fields) => map
                .into_iter()
                .filter(|(k, _)| k == ID_FIELD || fields.iter().any(|f| f == k))
                .collect(),
            Self::Exclude(fields) => map
                .into_iter()
                .filter(|(k, _)| !fields.iter().any(|f| f == k))
                .collect(),
        };
        Value::Object(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_hides_version_field() {
        let out = Projection::default().apply(json!({"id": "1", "title": "x", "__v": 3}));
        assert_eq!(out, json!({"id": "1", "title": "x"}));
    }

    #[test]
    fn include_keeps_id() {
        let out = Projection::parse("title, slug").apply(json!({
            "id": "1", "title": "x", "slug": "x", "order": 2
        }));
        assert_eq!(out, json!({"id": "1", "title": "x", "slug": "x"}));
    }
}
