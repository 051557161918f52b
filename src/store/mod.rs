//! Document store access.
//!
//! [`DocumentStore`] is the narrow repository interface every backend
//! implements: insert a document into a named collection, read documents back
//! through an equality [`Filter`], and list the collections that exist.
//! [`StoreHandle`] is the injectable, possibly-absent handle the HTTP layer
//! holds; it runs store calls on Tokio's blocking pool.

pub mod duckdb_store;
pub mod memory;

pub use duckdb_store::DuckDbStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Settings;
use crate::error::{Result, TcgError};

/// A stored document: a JSON object. Documents read back from a store carry
/// their identifier under [`ID_FIELD`].
pub type Document = Map<String, Value>;

/// Key under which stores expose a document's identifier.
pub const ID_FIELD: &str = "_id";

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Equality filter over top-level document fields.
///
/// An empty filter matches every document. A `null` condition value matches
/// documents where the field is null or missing. Numbers compare by value, so
/// a condition of `5` matches a stored `5.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality condition on `key`.
    ///
    /// Numeric values are compared as `f64`.
    pub fn eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check a document against every condition.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|(key, expected)| {
            let actual = doc.get(key).unwrap_or(&Value::Null);
            values_equal(actual, expected)
        })
    }

    /// Reject keys that are not plain identifiers and values that are not
    /// JSON scalars.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in &self.conditions {
            validate_name("filter key", key)?;
            if value.is_object() || value.is_array() {
                return Err(TcgError::InvalidArgument(format!(
                    "filter value for '{}' must be a scalar",
                    key
                )));
            }
        }
        Ok(())
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Generic collection access shared by every backend.
pub trait DocumentStore: Send + Sync {
    /// Insert `document` into `collection` and return the identifier the
    /// store assigned. Any caller-supplied [`ID_FIELD`] is discarded.
    fn create(&self, collection: &str, document: Document) -> Result<String>;

    /// Return every document in `collection` matching `filter`, each with
    /// its identifier under [`ID_FIELD`]. Order is whatever the backend
    /// yields and is not guaranteed.
    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Names of the collections that currently exist.
    fn list_collections(&self) -> Result<Vec<String>>;
}

/// Check that a collection, database or field name is a plain identifier.
///
/// Names are spliced into SQL by the DuckDB backend, so anything outside
/// `[A-Za-z_][A-Za-z0-9_]*` is refused.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TcgError::InvalidArgument(format!("invalid {} '{}'", kind, name)))
    }
}

/// Generate a fresh opaque document identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

// ---------------------------------------------------------------------------
// StoreHandle
// ---------------------------------------------------------------------------

/// Shared, possibly-absent handle to the process's document store.
///
/// Constructed once at startup and cloned into request handlers. When no
/// store is configured every [`run`](Self::run) fails with
/// [`TcgError::StoreUnavailable`].
#[derive(Clone)]
pub struct StoreHandle {
    inner: Option<Arc<dyn DocumentStore>>,
}

impl StoreHandle {
    pub fn new<S: DocumentStore + 'static>(store: S) -> Self {
        Self {
            inner: Some(Arc::new(store)),
        }
    }

    /// A handle with no backing store.
    pub fn unavailable() -> Self {
        Self { inner: None }
    }

    /// Open the DuckDB store described by `settings`.
    ///
    /// Missing settings or a failed open yield an unavailable handle; the
    /// failure is logged, not returned, so the service still starts.
    pub fn from_settings(settings: &Settings) -> Self {
        let (Some(url), Some(name)) = (&settings.database_url, &settings.database_name) else {
            log::warn!("DATABASE_URL or DATABASE_NAME not set; wishlist storage disabled");
            return Self::unavailable();
        };

        match DuckDbStore::open(url, name) {
            Ok(store) => {
                log::info!("Opened document store '{}' at {}", name, url);
                Self::new(store)
            }
            Err(e) => {
                log::warn!("Failed to open document store at {}: {}", url, e);
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Run a store operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn DocumentStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.inner.clone().ok_or(TcgError::StoreUnavailable)?;
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| TcgError::Task(format!("Task join error: {e}")))?
    }
}
