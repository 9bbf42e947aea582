//! Typed filter predicates.
//!
//! A `Filter` is a conjunction of per-field `Condition`s. Each condition
//! carries a comparison operator and a typed value parsed from the raw
//! request text, so `price[gte]=5` compares numerically and
//! `createdAt[lt]=2024-01-01T00:00:00Z` compares chronologically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A filter operand, typed from its textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl FilterValue {
    /// Type a raw parameter value: booleans, then numbers, then RFC 3339 dates, else text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Self::Number(n);
            }
        }
        if let Ok(d) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Date(d.with_timezone(&Utc));
        }
        Self::Text(raw.to_string())
    }

    /// Canonical text form, used when the document field is a string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Date(d) => d.to_rfc3339(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Equals,
    Gte,
    Gt,
    Lte,
    Lt,
}

impl Comparison {
    /// Operator named inside a `field[op]` parameter key.
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "gte" => Some(Self::Gte),
            "gt" => Some(Self::Gt),
            "lte" => Some(Self::Lte),
            "lt" => Some(Self::Lt),
            _ => None,
        }
    }

    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Self::Equals => ord == Ordering::Equal,
            Self::Gte => ord != Ordering::Less,
            Self::Gt => ord == Ordering::Greater,
            Self::Lte => ord != Ordering::Greater,
            Self::Lt => ord == Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dotted field path (e.g. `"projectType"` or `"meta.year"`).
    pub field: String,
    pub op: Comparison,
    pub value: FilterValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, op: Comparison, value: impl Into<FilterValue>) -> Self {
        Self { field: field.into(), op, value: value.into() }
    }

    /// Whether a document satisfies this condition. Missing fields never match.
    /// Array fields match when any element does.
    pub fn matches(&self, doc: &Value) -> bool {
        match lookup(doc, &self.field) {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => items.iter().any(|item| self.matches_value(item)),
            Some(v) => self.matches_value(v),
        }
    }

    fn matches_value(&self, v: &Value) -> bool {
        match compare_to(v, &self.value) {
            Some(ord) => self.op.accepts(ord),
            None => false,
        }
    }
}

/// Order a document value against a filter operand, if they are comparable.
fn compare_to(doc: &Value, value: &FilterValue) -> Option<Ordering> {
    match (doc, value) {
        (Value::Bool(a), FilterValue::Bool(b)) => Some(a.cmp(b)),
        (Value::Number(a), FilterValue::Number(b)) => a.as_f64()?.partial_cmp(b),
        (Value::String(s), FilterValue::Date(d)) => match DateTime::parse_from_rfc3339(s) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc).cmp(d)),
            Err(_) => Some(s.as_str().cmp(value.as_text().as_str())),
        },
        (Value::String(s), FilterValue::Text(t)) => Some(s.as_str().cmp(t.as_str())),
        // Schema-typed string fields receive the operand's text form.
        (Value::String(s), other) => Some(s.as_str().cmp(other.as_text().as_str())),
        (Value::Number(a), FilterValue::Text(t)) => {
            let b = t.trim().parse::<f64>().ok()?;
            a.as_f64()?.partial_cmp(&b)
        }
        _ => None,
    }
}

/// Resolve a dotted path inside a JSON document.
pub(crate) fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |cur, segment| cur.get(segment))
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// A conjunction of conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(Condition::new(field, Comparison::Equals, value))
    }

    pub fn gte(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(Condition::new(field, Comparison::Gte, value))
    }

    pub fn gt(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(Condition::new(field, Comparison::Gt, value))
    }

    pub fn lte(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(Condition::new(field, Comparison::Lte, value))
    }

    pub fn lt(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(Condition::new(field, Comparison::Lt, value))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}
