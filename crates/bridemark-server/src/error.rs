//! HTTP error types for the Bridemark server.
//!
//! Maps pipeline errors from `bridemark-core` into HTTP responses. Every
//! body carries `success: false`; validation failures list their problems
//! under `errors`, everything else has a single `message`. Delivery detail
//! is logged here and never sent to the client.

use std::time::Duration;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use bridemark_core::error::ContactError;

use crate::routes::ENDPOINTS;

pub const DELIVERY_FAILED: &str = "Failed to send email. Please try again later.";
pub const THROTTLED: &str = "Too many requests from this IP, please try again later.";
pub const NOT_FOUND: &str = "Route not found";

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// One or more form fields are invalid.
    Invalid(Vec<String>),
    /// The request body could not be read as a form.
    BadRequest(String),
    /// The client exceeded the contact-route throttle.
    TooManyRequests { retry_after: Duration },
    /// No route matched.
    NotFound,
    /// The mail relay failed; the string is logged only.
    Delivery(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "errors": errors })),
            )
                .into_response(),
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "errors": [msg] })),
            )
                .into_response(),
            Self::TooManyRequests { retry_after } => {
                // Round up so clients never retry a moment too early.
                let secs = retry_after
                    .as_secs()
                    .saturating_add(u64::from(retry_after.subsec_nanos() > 0));
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "success": false, "message": THROTTLED })),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(secs));
                response
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "message": NOT_FOUND,
                    "availableEndpoints": ENDPOINTS,
                })),
            )
                .into_response(),
            Self::Delivery(detail) => {
                error!(error = %detail, "error sending email");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": DELIVERY_FAILED })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Invalid { errors } => Self::Invalid(errors),
            ContactError::Delivery(e) => Self::Delivery(e.to_string()),
        }
    }
}
