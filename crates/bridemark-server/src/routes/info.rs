//! Informational routes: `/`, `/api/health`, `/api/test`.
//!
//! None of these touch the mail transport; they answer as long as the
//! process is up.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::ENDPOINTS;
use crate::state::AppState;

/// Build the informational router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/test", get(test))
}

// ── Response types ───────────────────────────────────────────────────

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub environment: String,
    pub endpoints: &'static [&'static str],
}

/// Response body for `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub environment: String,
}

/// Response body for `GET /api/test`.
#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Bridemark contact API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Receives contact-form inquiries and relays them by email",
        environment: state.environment.clone(),
        endpoints: ENDPOINTS,
    })
}

/// Health check endpoint. Always 200 while the process is serving.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Contact form API is running",
        timestamp: now(),
        environment: state.environment.clone(),
    })
}

async fn test() -> Json<TestResponse> {
    Json(TestResponse {
        success: true,
        message: "API is working",
        timestamp: now(),
    })
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
