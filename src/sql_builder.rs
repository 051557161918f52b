//! SQL builder with parameterized query construction.
//!
//! All user-supplied values go through DuckDB's parameter binding (`?` placeholders),
//! never through string interpolation. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use pokemon_tcg_checker::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("\"tcg\".\"wishlistitem\"")
//!     .select(&["_id", "CAST(doc AS VARCHAR) AS doc"])
//!     .where_json_eq("doc", "status", "bought")
//!     .build();
//! ```

/// Builds parameterized SQL queries safely.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_by_cols: Vec<String>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Compare a top-level key of a JSON column with a text value.
    ///
    /// Generates: `json_extract_string({column}, ?) = ?` with the key bound
    /// as the JSON path `$.{key}`.
    pub fn where_json_eq(&mut self, column: &str, key: &str, value: &str) -> &mut Self {
        self.where_clauses
            .push(format!("json_extract_string({}, ?) = ?", column));
        self.params.push(json_path(key));
        self.params.push(value.to_string());
        self
    }

    /// Compare a top-level key of a JSON column with a number.
    ///
    /// Both sides are cast to `DOUBLE`, so `5` and `5.0` are equal. Keys
    /// holding non-numeric text never match.
    pub fn where_json_number_eq(&mut self, column: &str, key: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!(
            "TRY_CAST(json_extract_string({}, ?) AS DOUBLE) = CAST(? AS DOUBLE)",
            column
        ));
        self.params.push(json_path(key));
        self.params.push(value.to_string());
        self
    }

    /// Match rows where a top-level key of a JSON column is null or missing.
    pub fn where_json_null(&mut self, column: &str, key: &str) -> &mut Self {
        self.where_clauses
            .push(format!("json_extract_string({}, ?) IS NULL", column));
        self.params.push(json_path(key));
        self
    }

    /// Add ORDER BY clauses (e.g. `"table_name ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        (parts.join("\n"), self.params.clone())
    }
}

fn json_path(key: &str) -> String {
    format!("$.{}", key)
}
