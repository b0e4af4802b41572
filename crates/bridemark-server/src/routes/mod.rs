//! HTTP route handlers for Bridemark.
//!
//! Routes are organized by concern:
//! - `info`: service metadata, health check, liveness echo
//! - `contact`: the rate-limited contact-form submission

pub mod contact;
pub mod info;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware as axum_mw;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Every route the service answers, as advertised by `/` and the 404 body.
pub const ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /api/health",
    "GET /api/test",
    "POST /api/contact",
];

/// Maximum contact submissions processed at once.
const CONTACT_CONCURRENCY: usize = 32;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Throttle and concurrency-limit the contact route only.
    let contact_routes = contact::router()
        .route_layer(axum_mw::from_fn_with_state(Arc::clone(&state), rate_limit))
        .layer(tower::limit::ConcurrencyLimitLayer::new(CONTACT_CONCURRENCY));

    // The site is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(info::router())
        .merge(contact_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
