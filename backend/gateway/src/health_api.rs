//! Health and welcome endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::server::AppState;

const SERVICE: &str = "folio";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: SERVICE.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}

/// Handler for `GET /`
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Folio portfolio API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
