//! Shared test fixtures.
//!
//! Provides a fake card catalog served on an ephemeral localhost port, and a
//! helper that serves the full application against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use pokemon_tcg_checker::prices::CardmarketPrices;
use pokemon_tcg_checker::{server, AppState, CatalogClient, Settings, StoreHandle};
use serde_json::json;
use tokio::net::TcpListener;

/// One request seen by the fake catalog.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// A running fake catalog and the requests it has received.
pub struct FakeCatalog {
    pub base_url: String,
    pub requests: RequestLog,
}

impl FakeCatalog {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Canned catalog responses:
///
/// - `/cards` and `/sets`: 200 with a small page of data
/// - `/cards/missing`: 404 with a plain-text body
/// - `/cards/broken`: 200 with a body that is not JSON
/// - `/cards/{id}`: 200 echoing the raw id segment
async fn catalog_handler(
    State(log): State<RequestLog>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    log.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        query,
    });

    match path.as_str() {
        "/cards" => Json(cards_page()).into_response(),
        "/sets" => Json(sets_page()).into_response(),
        "/cards/missing" => (StatusCode::NOT_FOUND, "card not found").into_response(),
        "/cards/broken" => (StatusCode::OK, "<html>oops</html>").into_response(),
        p if p.starts_with("/cards/") => {
            Json(json!({ "data": { "id": &p["/cards/".len()..] } })).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "no such endpoint").into_response(),
    }
}

pub fn cards_page() -> serde_json::Value {
    json!({
        "data": [
            { "id": "sv3-125", "name": "Charizard ex", "set": { "id": "sv3" } }
        ],
        "page": 2,
        "pageSize": 10,
        "count": 1,
        "totalCount": 11
    })
}

pub fn sets_page() -> serde_json::Value {
    json!({
        "data": [
            { "id": "sv3", "name": "Obsidian Flames", "releaseDate": "2023/08/11" }
        ],
        "page": 1,
        "pageSize": 50,
        "count": 1,
        "totalCount": 1
    })
}

/// Serve the fake catalog on `127.0.0.1` and return its base URL.
pub async fn spawn_fake_catalog() -> FakeCatalog {
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .fallback(catalog_handler)
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeCatalog {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// A base URL nothing listens on.
pub async fn dead_catalog_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Settings built from the given variables only.
pub fn settings_with(vars: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(move |key| vars.get(key).cloned())
}

/// Serve the whole application and return its base URL.
pub async fn spawn_app(store: StoreHandle, catalog_url: &str, settings: Settings) -> String {
    let state = Arc::new(AppState {
        catalog: CatalogClient::with_base_url(catalog_url, Duration::from_secs(5)).unwrap(),
        store,
        prices: CardmarketPrices::new(settings.cardmarket.clone()),
        settings,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server::serve(listener, state).await.unwrap();
    });

    format!("http://{addr}")
}
