//! In-process document store, used by tests and for running without a database.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{new_id, validate_name, Document, DocumentStore, Filter, ID_FIELD};
use crate::error::{Result, TcgError};

/// Keeps every collection as an insertion-ordered list of documents.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, collection: &str, mut document: Document) -> Result<String> {
        validate_name("collection", collection)?;
        let id = new_id();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        let mut collections = self
            .collections
            .lock()
            .map_err(|_| TcgError::Task("Store lock poisoned".into()))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        validate_name("collection", collection)?;
        filter.validate()?;

        let collections = self
            .collections
            .lock()
            .map_err(|_| TcgError::Task("Store lock poisoned".into()))?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| TcgError::Task("Store lock poisoned".into()))?;
        Ok(collections.keys().cloned().collect())
    }
}
