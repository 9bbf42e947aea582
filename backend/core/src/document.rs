use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-maintained metadata shared by every persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Revision counter, bumped on every write. Hidden from listings by default.
    #[serde(rename = "__v", default)]
    pub revision: u32,
}

impl DocumentMeta {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), created_at: now, updated_at: now, revision: 0 }
    }

    /// Record a write.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.revision += 1;
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity that can live in a `DocumentStore`.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, used in logs and error messages.
    const COLLECTION: &'static str;

    /// Fields that must be unique across the collection.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn meta(&self) -> &DocumentMeta;
    fn meta_mut(&mut self) -> &mut DocumentMeta;

    fn id(&self) -> Uuid {
        self.meta().id
    }
}
