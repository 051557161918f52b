use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::Value;

use crate::catalog::SetListParams;
use crate::server::{AppError, AppState};

/// GET /api/sets?page=1&pageSize=50&orderBy=-releaseDate
///
/// List sets from the card catalog, relayed unchanged.
pub async fn list_sets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SetListParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.catalog.list_sets(&params).await?))
}
