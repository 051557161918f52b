use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use crate::error::TcgError;
use crate::schema::ValidationErrors;

const QUERY_ERROR_PREFIX: &str = "Failed to deserialize query string: ";

/// Error rendered as a JSON `{"detail": ...}` response with an appropriate
/// HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub detail: Value,
}

impl AppError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Value::String(detail.into()),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// 422 carrying field-level detail.
    pub fn unprocessable(errors: &ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: serde_json::to_value(errors).unwrap_or(Value::Null),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<TcgError> for AppError {
    fn from(e: TcgError) -> Self {
        match e {
            TcgError::Upstream { status, body } => AppError::new(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            ),
            TcgError::NotImplemented(msg) => AppError::new(StatusCode::NOT_IMPLEMENTED, msg),
            TcgError::Validation(errors) => AppError::unprocessable(&errors),
            TcgError::InvalidArgument(msg) => AppError::new(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => {
                AppError::unprocessable(&ValidationErrors::single("body", e.body_text()))
            }
            JsonRejection::JsonDataError(e) => {
                AppError::unprocessable(&ValidationErrors::single("body", e.body_text()))
            }
            other => AppError::new(other.status(), other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        match rejection {
            QueryRejection::FailedToDeserializeQueryString(e) => {
                let (field, message) = split_query_error(&e.body_text());
                AppError::unprocessable(&ValidationErrors::single(field, message))
            }
            other => AppError::new(other.status(), other.body_text()),
        }
    }
}

/// Split axum's `"...: page: invalid digit"` text into the offending
/// parameter and the message. Falls back to `query` when no parameter is named.
fn split_query_error(text: &str) -> (String, String) {
    let rest = text.strip_prefix(QUERY_ERROR_PREFIX).unwrap_or(text);
    match rest.split_once(": ") {
        Some((field, message))
            if !field.is_empty()
                && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            (field.to_string(), message.to_string())
        }
        _ => ("query".to_string(), rest.to_string()),
    }
}

