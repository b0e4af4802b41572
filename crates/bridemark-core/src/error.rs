//! Error types for `bridemark-core`.
//!
//! Validation failures carry the full list of violated constraints so the
//! caller can show every problem at once. Delivery failures wrap the
//! transport error untouched; deciding what reaches the visitor is the HTTP
//! layer's job.

use bridemark_mail::MailError;

/// Errors from the contact pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// One or more fields violated their constraints.
    #[error("submission rejected: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },

    /// The inquiry email could not be delivered.
    #[error("inquiry delivery failed: {0}")]
    Delivery(#[from] MailError),
}
