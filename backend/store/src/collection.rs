use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use folio_core::{Document, DocumentStore, FolioError, FolioResult};
use folio_query::{compare_documents, Filter, ListQuery, SortKey};

/// A single collection kept in insertion order.
pub struct MemoryCollection<T: Document> {
    docs: Arc<RwLock<Vec<T>>>,
    /// Condition every read and write is restricted to.
    scope: Filter,
}

impl<T: Document> MemoryCollection<T> {
    pub fn new() -> Self {
        Self { docs: Arc::new(RwLock::new(Vec::new())), scope: Filter::new() }
    }

    /// Restrict every operation to documents matching `scope`.
    pub fn with_scope(scope: Filter) -> Self {
        Self { docs: Arc::new(RwLock::new(Vec::new())), scope }
    }

    /// Number of stored documents, ignoring the scope.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    fn to_json(doc: &T) -> FolioResult<Value> {
        serde_json::to_value(doc).map_err(|e| {
            FolioError::Storage(format!("failed to encode {} document: {e}", T::COLLECTION))
        })
    }

    fn visible(&self, json: &Value, filter: &Filter) -> bool {
        self.scope.matches(json) && filter.matches(json)
    }

    /// Matching documents with their JSON form, in storage order.
    fn select(&self, docs: &[T], filter: &Filter) -> FolioResult<Vec<(T, Value)>> {
        let mut out = Vec::new();
        for doc in docs {
            let json = Self::to_json(doc)?;
            if self.visible(&json, filter) {
                out.push((doc.clone(), json));
            }
        }
        Ok(out)
    }

    fn sorted(mut rows: Vec<(T, Value)>, sort: &[SortKey]) -> Vec<(T, Value)> {
        if !sort.is_empty() {
            rows.sort_by(|a, b| compare_documents(&a.1, &b.1, sort));
        }
        rows
    }

    fn check_unique(docs: &[T], candidate: &T) -> FolioResult<()> {
        if T::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }
        let cand = Self::to_json(candidate)?;
        for other in docs.iter().filter(|d| d.id() != candidate.id()) {
            let other = Self::to_json(other)?;
            for field in T::UNIQUE_FIELDS {
                if let (Some(a), Some(b)) = (cand.get(field), other.get(field)) {
                    if a == b {
                        return Err(FolioError::conflict(format!(
                            "Duplicate field value: {a}. Please use another value."
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryCollection<T> {
    async fn find(&self, filter: &Filter, sort: &[SortKey]) -> FolioResult<Vec<T>> {
        let docs = self.docs.read().await;
        let rows = Self::sorted(self.select(&docs, filter)?, sort);
        Ok(rows.into_iter().map(|(doc, _)| doc).collect())
    }

    async fn find_one(&self, filter: &Filter) -> FolioResult<Option<T>> {
        let docs = self.docs.read().await;
        for doc in docs.iter() {
            if self.visible(&Self::to_json(doc)?, filter) {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn find_page(&self, query: &ListQuery) -> FolioResult<Vec<Value>> {
        let docs = self.docs.read().await;
        let rows = Self::sorted(self.select(&docs, &query.filter)?, &query.sort);
        let skip = usize::try_from(query.pagination.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.pagination.limit).unwrap_or(usize::MAX);
        debug!(
            collection = T::COLLECTION,
            matched = rows.len(),
            skip,
            limit,
            "Listing page"
        );
        Ok(rows
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, json)| query.projection.apply(json))
            .collect())
    }

    async fn count(&self, filter: &Filter) -> FolioResult<u64> {
        let docs = self.docs.read().await;
        Ok(self.select(&docs, filter)?.len() as u64)
    }

    async fn get(&self, id: Uuid) -> FolioResult<Option<T>> {
        let docs = self.docs.read().await;
        match docs.iter().find(|d| d.id() == id) {
            Some(doc) if self.scope.matches(&Self::to_json(doc)?) => Ok(Some(doc.clone())),
            _ => Ok(None),
        }
    }

    async fn insert(&self, doc: T) -> FolioResult<T> {
        let mut docs = self.docs.write().await;
        if docs.iter().any(|d| d.id() == doc.id()) {
            return Err(FolioError::conflict(format!("Duplicate id: {}", doc.id())));
        }
        Self::check_unique(&docs, &doc)?;
        debug!(collection = T::COLLECTION, id = %doc.id(), "Inserted document");
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn replace(&self, mut doc: T) -> FolioResult<T> {
        let mut docs = self.docs.write().await;
        Self::check_unique(&docs, &doc)?;
        let idx = docs
            .iter()
            .position(|d| d.id() == doc.id())
            .ok_or_else(|| FolioError::not_found(format!("No document found with id {}", doc.id())))?;
        if !self.scope.matches(&Self::to_json(&docs[idx])?) {
            return Err(FolioError::not_found(format!("No document found with id {}", doc.id())));
        }
        doc.meta_mut().touch();
        docs[idx] = doc.clone();
        Ok(doc)
    }

    async fn delete(&self, id: Uuid) -> FolioResult<Option<T>> {
        let mut docs = self.docs.write().await;
        let Some(idx) = docs.iter().position(|d| d.id() == id) else {
            return Ok(None);
        };
        if !self.scope.matches(&Self::to_json(&docs[idx])?) {
            return Ok(None);
        }
        Ok(Some(docs.remove(idx)))
    }
}
