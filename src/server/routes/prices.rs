use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::Value;

use crate::server::{AppError, AppState};

/// GET /api/prices/cardmarket/{card_id}
///
/// Reserved for Cardmarket prices. Responds 501 until OAuth signing exists.
pub async fn cardmarket_price(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.prices.price(&card_id)?))
}
