//! Mail delivery error types.
//!
//! Variants carry the relay's own reason string so the failure can be
//! diagnosed from server logs. Callers decide how much of it to expose.

/// Errors that can occur while building or delivering an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// An address could not be parsed as a mailbox.
    #[error("invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The message could not be assembled.
    #[error("failed to build message: {reason}")]
    Build { reason: String },

    /// The relay rejected the message or could not be reached.
    #[error("delivery via {transport} failed: {reason}")]
    Delivery {
        transport: &'static str,
        reason: String,
    },
}
