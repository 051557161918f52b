//! HTTP facade: the axum router and its handlers.

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Build the service router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::meta::root))
        .route("/test", get(routes::meta::diagnostics))
        .route("/schema", get(routes::meta::schema))
        .route("/api/cards", get(routes::cards::search_cards))
        .route("/api/cards/{card_id}", get(routes::cards::get_card))
        .route("/api/sets", get(routes::sets::list_sets))
        .route(
            "/api/prices/cardmarket/{card_id}",
            get(routes::prices::cardmarket_price),
        )
        .route(
            "/api/wishlist",
            get(routes::wishlist::list_wishlist).post(routes::wishlist::add_wishlist),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the router on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> crate::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state)).await?;
    Ok(())
}
