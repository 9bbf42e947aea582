use async_trait::async_trait;
use folio_query::{Filter, ListQuery, SortKey};
use serde_json::Value;
use uuid::Uuid;

use crate::contact::Contact;
use crate::document::Document;
use crate::error::FolioResult;

/// Read/write access to one collection of documents.
///
/// Implementations evaluate typed `Filter`s and `SortKey`s natively; callers
/// never hand over query strings.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// All matching documents, ordered by `sort`.
    async fn find(&self, filter: &Filter, sort: &[SortKey]) -> FolioResult<Vec<T>>;

    /// First matching document.
    async fn find_one(&self, filter: &Filter) -> FolioResult<Option<T>>;

    /// One page of matching documents, projected to JSON.
    async fn find_page(&self, query: &ListQuery) -> FolioResult<Vec<Value>>;

    async fn count(&self, filter: &Filter) -> FolioResult<u64>;

    async fn get(&self, id: Uuid) -> FolioResult<Option<T>>;

    /// Insert a new document. Fails with `Conflict` on a unique-field clash.
    async fn insert(&self, doc: T) -> FolioResult<T>;

    /// Replace an existing document, bumping its revision.
    async fn replace(&self, doc: T) -> FolioResult<T>;

    /// Remove a document, returning it if it existed.
    async fn delete(&self, id: Uuid) -> FolioResult<Option<T>>;
}

/// Receives new contact submissions (email delivery lives behind this seam).
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, contact: &Contact) -> anyhow::Result<()>;
}
