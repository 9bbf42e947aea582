//! Build a `ListQuery` from raw request parameters.
//!
//! Reserved keys (`page`, `sort`, `limit`, `fields`) drive paging, ordering
//! and projection; every other key becomes a filter condition. Keys of the
//! form `field[op]` with `op` in `gte`, `gt`, `lte`, `lt` become range
//! conditions on `field`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::filter::{Comparison, Condition, Filter, FilterValue};
use crate::pagination::{Pagination, DEFAULT_LIMIT};
use crate::projection::Projection;
use crate::sort::{parse_sort, SortKey};

pub const RESERVED_PARAMS: [&str; 4] = ["page", "sort", "limit", "fields"];

/// Per-collection listing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingProfile {
    /// Ordering applied when the request has no `sort`.
    pub default_sort: Vec<SortKey>,
    /// Page size applied when the request has no valid `limit`.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// When set, only these fields may be filtered on; other keys are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable: Option<Vec<String>>,
}

fn default_page_size() -> u64 {
    DEFAULT_LIMIT
}

impl ListingProfile {
    /// Featured projects first, then by display order.
    pub fn projects() -> Self {
        Self {
            default_sort: vec![SortKey::desc("featured"), SortKey::asc("order")],
            page_size: DEFAULT_LIMIT,
            filterable: None,
        }
    }

    /// Newest submissions first.
    pub fn contacts() -> Self {
        Self {
            default_sort: vec![SortKey::desc("createdAt")],
            page_size: DEFAULT_LIMIT,
            filterable: None,
        }
    }

    fn allows(&self, field: &str) -> bool {
        match &self.filterable {
            Some(fields) => fields.iter().any(|f| f == field),
            None => true,
        }
    }
}

/// A fully-specified listing request, ready for a store to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub pagination: Pagination,
}

impl ListQuery {
    /// Unpaged query over a filter with an explicit ordering.
    pub fn all(filter: Filter, sort: Vec<SortKey>) -> Self {
        Self {
            filter,
            sort,
            projection: Projection::default(),
            pagination: Pagination::new(1, u64::MAX),
        }
    }
}

/// Build a listing query. Never fails; malformed values fall back to defaults.
pub fn build(params: &BTreeMap<String, String>, profile: &ListingProfile) -> ListQuery {
    let mut filter = Filter::new();
    for (key, raw) in params {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            continue;
        }
        let (field, op) = split_operator(key);
        if !profile.allows(field) {
            debug!(field = %field, "Dropping filter on non-filterable field");
            continue;
        }
        filter = filter.with(Condition::new(field, op, FilterValue::parse(raw)));
    }

    let sort = params
        .get("sort")
        .map(|s| parse_sort(s))
        .filter(|keys| !keys.is_empty())
        .unwrap_or_else(|| profile.default_sort.clone());

    let projection = params
        .get("fields")
        .map(|f| Projection::parse(f))
        .unwrap_or_default();

    let pagination = Pagination::from_raw(
        params.get("page").map(String::as_str),
        params.get("limit").map(String::as_str),
        profile.page_size,
    );

    ListQuery { filter, sort, projection, pagination }
}

/// Split `price[gte]` into `("price", Gte)`. Anything else is an equality on the whole key.
fn split_operator(key: &str) -> (&str, Comparison) {
    if let Some(open) = key.find('[') {
        if let Some(op) = key[open + 1..].strip_suffix(']') {
            if let Some(cmp) = Comparison::from_operator(op) {
                if open > 0 {
                    return (&key[..open], cmp);
                }
            }
        }
    }
    (key, Comparison::Equals)
}
