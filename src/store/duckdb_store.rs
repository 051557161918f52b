//! DuckDB-backed document store.

use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::{new_id, validate_name, Document, DocumentStore, Filter, ID_FIELD};
use crate::connection::Connection;
use crate::error::{Result, TcgError};
use crate::sql_builder::SqlBuilder;

/// Document store keeping each collection as a DuckDB table of JSON documents.
///
/// The connection is not `Sync`, so access is serialized through a mutex.
pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    /// Open the store at `location` using `database` as the schema name.
    pub fn open(location: &str, database: &str) -> Result<Self> {
        validate_name("database name", database)?;
        let conn = Connection::open(location, database)?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory store.
    pub fn in_memory(database: &str) -> Result<Self> {
        validate_name("database name", database)?;
        Ok(Self::from_connection(Connection::open_in_memory(database)?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TcgError::Task("Store lock poisoned".into()))
    }
}

impl DocumentStore for DuckDbStore {
    fn create(&self, collection: &str, mut document: Document) -> Result<String> {
        validate_name("collection", collection)?;
        document.remove(ID_FIELD);
        let body = serde_json::to_string(&document)?;

        let conn = self.lock()?;
        conn.ensure_collection(collection)?;

        let id = new_id();
        conn.execute_update(
            &format!(
                "INSERT INTO {} (_id, doc) VALUES (?, ?)",
                conn.qualified(collection)
            ),
            &[id.clone(), body],
        )?;
        log::info!("Inserted document {} into {}", id, collection);
        Ok(id)
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        validate_name("collection", collection)?;
        filter.validate()?;

        let conn = self.lock()?;
        if !conn.has_collection(collection)? {
            return Ok(Vec::new());
        }

        let mut qb = SqlBuilder::new(&conn.qualified(collection));
        qb.select(&["_id", "CAST(doc AS VARCHAR) AS doc"]);
        for (key, value) in filter.conditions() {
            match value {
                Value::Null => qb.where_json_null("doc", key),
                Value::String(s) => qb.where_json_eq("doc", key, s),
                Value::Number(n) => qb.where_json_number_eq("doc", key, &n.to_string()),
                other => qb.where_json_eq("doc", key, &other.to_string()),
            };
        }

        let (sql, params) = qb.build();
        let rows = conn.execute(&sql, &params)?;

        let mut out = Vec::with_capacity(rows.len());
        for mut row in rows {
            let mut doc = match row.remove("doc") {
                Some(Value::String(text)) => match serde_json::from_str(&text)? {
                    Value::Object(map) => map,
                    _ => Document::new(),
                },
                _ => Document::new(),
            };
            let id = row.remove(ID_FIELD).unwrap_or(Value::Null);
            doc.insert(ID_FIELD.to_string(), id);
            out.push(doc);
        }
        Ok(out)
    }

    fn list_collections(&self) -> Result<Vec<String>> {
        self.lock()?.collections()
    }
}
