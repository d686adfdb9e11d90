//! In-memory store.

use std::{collections::HashMap, sync::Mutex};

use {async_trait::async_trait, tracing::debug};

use crate::{Collection, Document, Filter, Result, store::DocumentStore};

/// In-memory store backed by `HashMap`. Documents keep insertion order and
/// nothing is persisted. Duplicate `_id`s are accepted.
pub struct InMemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.get(&collection).map_or(0, Vec::len)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<()> {
        debug!(%collection, id = ?document.get("_id"), "insert");
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.entry(collection).or_default().push(document);
        Ok(())
    }
}
