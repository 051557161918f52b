use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde_json::Value;

use crate::catalog::CardSearchParams;
use crate::server::{AppError, AppState};

/// GET /api/cards?q=name:Charizard&page=1&pageSize=24
///
/// Search the card catalog. The body is the catalog's response, unchanged.
pub async fn search_cards(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CardSearchParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.catalog.search_cards(&params).await?))
}

/// GET /api/cards/{card_id}
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.catalog.get_card(&card_id).await?))
}
