//! DuckDB connection wrapper holding one database schema of collections.
//!
//! Each collection is a table `(_id VARCHAR PRIMARY KEY, doc JSON)` inside the
//! configured schema. Tables are created lazily on first insert and tracked
//! so repeated inserts skip the DDL.

use crate::error::Result;
use crate::sql_builder::SqlBuilder;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Location value meaning "in-memory database".
pub const MEMORY_LOCATION: &str = ":memory:";

const URL_SCHEME: &str = "duckdb://";

/// Wraps a DuckDB connection scoped to a single schema.
pub struct Connection {
    conn: DuckDbConnection,
    schema: String,
    known_collections: RefCell<HashSet<String>>,
}

impl Connection {
    /// Open the database at `location` and ensure `schema` exists.
    ///
    /// `location` is a file path, optionally prefixed with `duckdb://`, or
    /// `:memory:`. Parent directories of a file path are created.
    pub fn open(location: &str, schema: &str) -> Result<Self> {
        let path = location.strip_prefix(URL_SCHEME).unwrap_or(location);
        let conn = if path.is_empty() || path == MEMORY_LOCATION {
            DuckDbConnection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            DuckDbConnection::open(path)?
        };
        Self::with_connection(conn, schema)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(schema: &str) -> Result<Self> {
        Self::with_connection(DuckDbConnection::open_in_memory()?, schema)
    }

    fn with_connection(conn: DuckDbConnection, schema: &str) -> Result<Self> {
        conn.execute_batch(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema))?;
        Ok(Self {
            conn,
            schema: schema.to_string(),
            known_collections: RefCell::new(HashSet::new()),
        })
    }

    /// Name of the schema collections live in.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Fully qualified, quoted table name for a collection.
    pub fn qualified(&self, collection: &str) -> String {
        format!("\"{}\".\"{}\"", self.schema, collection)
    }

    /// Create the collection table if it does not exist yet.
    pub fn ensure_collection(&self, collection: &str) -> Result<()> {
        if self.known_collections.borrow().contains(collection) {
            return Ok(());
        }
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (_id VARCHAR PRIMARY KEY, doc JSON NOT NULL)",
            self.qualified(collection)
        ))?;
        self.known_collections
            .borrow_mut()
            .insert(collection.to_string());
        log::debug!("Registered collection: {}", self.qualified(collection));
        Ok(())
    }

    /// Check whether a collection table exists, consulting the catalog when
    /// this connection has not created it itself.
    pub fn has_collection(&self, collection: &str) -> Result<bool> {
        if self.known_collections.borrow().contains(collection) {
            return Ok(true);
        }
        let found = self
            .collections()?
            .iter()
            .any(|name| name == collection);
        if found {
            self.known_collections
                .borrow_mut()
                .insert(collection.to_string());
        }
        Ok(found)
    }

    /// Names of all collection tables in the schema, sorted.
    pub fn collections(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new("information_schema.tables")
            .select(&["table_name"])
            .where_eq("table_schema", &self.schema)
            .order_by(&["table_name ASC"])
            .build();
        let rows = self.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| match row.remove("table_name") {
                Some(serde_json::Value::String(name)) => Some(name),
                _ => None,
            })
            .collect())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row maps column name to a `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let column_names: Vec<String> = match rows.as_ref() {
            Some(stmt) => stmt.column_names(),
            None => Vec::new(),
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute a data-modifying statement and return the affected row count.
    pub fn execute_update(&self, sql: &str, params: &[String]) -> Result<usize> {
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();
        Ok(self.conn.execute(sql, param_values.as_slice())?)
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => serde_json::Value::Null,
    }
}
