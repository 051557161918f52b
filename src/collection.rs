//! Typed access to a single collection.
//!
//! A [`Record`] type names its collection through its [`Schema`]; a
//! [`Collection`] borrows any [`DocumentStore`] and converts between the
//! record type and raw documents.

use std::marker::PhantomData;

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TcgError};
use crate::schema::{Schema, ValidationErrors};
use crate::store::{DocumentStore, Filter, ID_FIELD};

/// A record type persisted in its own collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Declarative schema used for validation and discovery.
    fn schema() -> &'static Schema;

    fn collection() -> &'static str {
        Self::schema().collection
    }

    /// Validate an untrusted payload against the schema and build the record.
    fn parse(payload: &Value) -> std::result::Result<Self, ValidationErrors> {
        let fields = Self::schema().validate(payload)?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ValidationErrors::single("body", e.to_string()))
    }
}

/// A record as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub record: T,
}

/// Typed view of one collection in a [`DocumentStore`].
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        T::collection()
    }

    /// Insert a record, stamping `created_at` and `updated_at`.
    pub fn create(&self, record: &T) -> Result<String> {
        let mut doc = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => {
                return Err(TcgError::InvalidArgument(format!(
                    "{} records must serialize to a JSON object",
                    T::schema().name
                )))
            }
        };
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        doc.insert("created_at".to_string(), Value::String(now.clone()));
        doc.insert("updated_at".to_string(), Value::String(now));
        self.store.create(T::collection(), doc)
    }

    /// Read every record matching `filter`.
    pub fn query(&self, filter: &Filter) -> Result<Vec<Stored<T>>> {
        self.store
            .query(T::collection(), filter)?
            .into_iter()
            .map(|mut doc| {
                // Identifiers are always presented as strings.
                if let Some(id) = doc.remove(ID_FIELD) {
                    let id = match id {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    doc.insert("id".to_string(), Value::String(id));
                }
                Ok(serde_json::from_value(Value::Object(doc))?)
            })
            .collect()
    }
}
