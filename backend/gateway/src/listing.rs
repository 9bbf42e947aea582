//! Shared listing response for collection endpoints.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use folio_core::{Document, DocumentStore, FolioResult};
use folio_query::{build, ListingProfile, PageInfo};

/// Run a listing request and shape `{status, results, total, page, pages, data: {<key>: [...]}}`.
pub async fn list_page<T: Document>(
    store: &dyn DocumentStore<T>,
    params: &BTreeMap<String, String>,
    profile: &ListingProfile,
    key: &str,
) -> FolioResult<Value> {
    let query = build(params, profile);
    let rows = store.find_page(&query).await?;
    let total = store.count(&query.filter).await?;
    let info = PageInfo::new(rows.len(), total, query.pagination);

    let mut data = Map::new();
    data.insert(key.to_string(), Value::Array(rows));
    Ok(json!({
        "status": "success",
        "results": info.results,
        "total": info.total,
        "page": info.page,
        "pages": info.pages,
        "data": data,
    }))
}
