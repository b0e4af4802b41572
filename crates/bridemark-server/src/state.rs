//! Shared application state for the Bridemark server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. The rate limiter is the only piece of mutable
//! state that outlives a request.

use std::sync::Arc;

use bridemark_core::contact::ContactService;
use bridemark_core::ratelimit::RateLimiter;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Validate → compose → deliver pipeline.
    pub contact: ContactService,
    /// Per-address throttle for `POST /api/contact`.
    pub limiter: Arc<RateLimiter>,
    /// Runtime environment label.
    pub environment: String,
    /// Whether to take the client address from `X-Forwarded-For`.
    pub trust_proxy: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
