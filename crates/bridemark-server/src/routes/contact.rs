//! Contact route: `POST /api/contact`.
//!
//! Accepts the form as JSON or `application/x-www-form-urlencoded`, runs it
//! through the [`ContactService`](bridemark_core::contact::ContactService),
//! and reports the outcome as JSON. Throttling happens in middleware before
//! this handler is reached.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use axum::routing::post;
use axum::{Extension, Form, Json, Router};
use serde::Serialize;
use tracing::{debug, info};

use bridemark_core::submission::Submission;

use crate::error::AppError;
use crate::middleware::ClientAddr;
use crate::state::AppState;

pub const SENT: &str = "Email sent successfully!";
pub const UNSUPPORTED_BODY: &str =
    "Unsupported content type; send JSON or application/x-www-form-urlencoded";
pub const MALFORMED_JSON: &str = "Request body must be valid JSON";

/// Build the contact router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/contact", post(submit))
}

/// Response body for a delivered submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Form payload extracted from either JSON or a urlencoded body.
#[derive(Debug)]
pub struct ContactForm(pub Submission);

impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_urlencoded = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let submission = if is_urlencoded {
            Form::<Submission>::from_request(req, state)
                .await
                .map(|Form(s)| s)
                .map_err(|e| {
                    debug!(error = %e, "rejected form body");
                    AppError::BadRequest("Invalid form body".to_owned())
                })?
        } else {
            Json::<Submission>::from_request(req, state)
                .await
                .map(|Json(s)| s)
                .map_err(|e| {
                    debug!(error = %e, "rejected JSON body");
                    let msg = match e {
                        JsonRejection::MissingJsonContentType(_) => UNSUPPORTED_BODY,
                        _ => MALFORMED_JSON,
                    };
                    AppError::BadRequest(msg.to_owned())
                })?
        };

        Ok(Self(submission))
    }
}

/// Validate, compose, and deliver a contact-form submission.
///
/// Returns 200 once the inquiry is delivered, 400 with every validation
/// error, or 500 with a generic message if the relay fails.
async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(ClientAddr(client)): Extension<ClientAddr>,
    ContactForm(submission): ContactForm,
) -> Result<Json<SubmitResponse>, AppError> {
    let receipt = state.contact.submit(submission).await?;

    info!(
        client = %client,
        confirmation_sent = receipt.confirmation_sent,
        "contact submission handled"
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: SENT,
    }))
}
