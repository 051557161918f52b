use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::collection::{Collection, Record};
use crate::models::WishlistItem;
use crate::server::{AppError, AppState};
use crate::store::Filter;

#[derive(Deserialize)]
pub struct ListWishlistParams {
    pub status: Option<String>,
}

/// POST /api/wishlist
///
/// Validate the payload against the `WishlistItem` schema and store it.
/// Responds `{"id": "..."}` with the identifier the store assigned.
pub async fn add_wishlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let item = WishlistItem::parse(&payload).map_err(crate::TcgError::from)?;

    let id = state
        .store
        .run(move |s| Collection::<WishlistItem>::new(s).create(&item))
        .await?;

    Ok(Json(json!({ "id": id })))
}

/// GET /api/wishlist?status=bought
///
/// List wishlist items, optionally only those with the given status.
pub async fn list_wishlist(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListWishlistParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    let filter = match params.status.filter(|s| !s.is_empty()) {
        Some(status) => Filter::all().eq("status", status),
        None => Filter::all(),
    };

    let items = state
        .store
        .run(move |s| Collection::<WishlistItem>::new(s).query(&filter))
        .await?;

    Ok(Json(json!({ "items": items })))
}
