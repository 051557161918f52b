use crate::schema::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum TcgError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables")]
    StoreUnavailable,

    /// The upstream catalog answered with something other than 200.
    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    NotImplemented(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task error: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, TcgError>;
