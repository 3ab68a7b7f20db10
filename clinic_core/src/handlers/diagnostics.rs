//! Liveness, greeting and store diagnostic handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::{error::truncate_chars, models::MessageResponse, AppState};

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 80;

/// Store state as seen from the running process. Failures are reported in
/// the payload, never as an HTTP error status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for StoreDiagnostics {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

fn set_marker(present: bool) -> String {
    let marker = if present { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

pub async fn handle_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Vet Clinic API is running",
    })
}

pub async fn handle_hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the Vet Clinic backend API!",
    })
}

pub async fn handle_store_diagnostics(State(state): State<AppState>) -> Json<StoreDiagnostics> {
    info!("GET /test - checking document store");

    let database = &state.config.database;
    let mut report = StoreDiagnostics {
        database_url: Some(set_marker(database.url.is_some())),
        database_name: Some(set_marker(database.name.is_some())),
        ..StoreDiagnostics::default()
    };

    if !state.persistence.is_available() {
        report.database = "⚠️  Available but not initialized".to_string();
        return Json(report);
    }

    if let Err(e) = state.persistence.ping().await {
        warn!("Store ping failed: {}", e);
        report.database = format!(
            "❌ Unreachable: {}",
            truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
        );
        return Json(report);
    }

    report.connection_status = "Connected".to_string();

    match state.persistence.collection_names().await {
        Ok(names) => {
            report.collections = names.into_iter().take(MAX_COLLECTIONS).collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            warn!("Store diagnostic failed: {}", e);
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
            );
        }
    }

    Json(report)
}
