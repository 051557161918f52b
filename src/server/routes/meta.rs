use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::models;
use crate::schema::Schema;
use crate::server::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 80;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Pokemon TCG Checker Backend running" }))
}

/// Body of the diagnostic probe.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /test
///
/// Report store and configuration health. Always 200; failures are written
/// into the body.
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<Diagnostics> {
    let mut report = Diagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_or_not(state.settings.database_url.is_some()),
        database_name: set_or_not(state.settings.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if !state.store.is_available() {
        report.database = "⚠️  Available but not initialized".to_string();
        return Json(report);
    }

    report.database = "✅ Available".to_string();
    match state.store.run(|s| s.list_collections()).await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            report.collections = names;
            report.database = "✅ Connected & Working".to_string();
            report.connection_status = "Connected".to_string();
        }
        Err(e) => {
            let msg: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            log::warn!("Diagnostic collection listing failed: {}", e);
            report.database = format!("⚠️  Connected but Error: {}", msg);
        }
    }

    Json(report)
}

fn set_or_not(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

/// GET /schema
///
/// Declarative schemas of the persisted collections, keyed by collection name.
pub async fn schema() -> Json<BTreeMap<&'static str, &'static Schema>> {
    Json(
        models::schemas()
            .into_iter()
            .map(|s| (s.collection, s))
            .collect(),
    )
}
