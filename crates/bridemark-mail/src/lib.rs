//! Mail delivery abstraction for Bridemark.
//!
//! This crate defines the [`MailTransport`] trait, a delivery interface that
//! knows nothing about contact forms, validation, or templates. The contact
//! pipeline in `bridemark-core` composes an [`Email`] and hands it to a
//! transport, awaiting a single acknowledgment.
//!
//! Three implementations are provided:
//!
//! - [`SmtpRelay`]: production default, credential-authenticated SMTP via lettre (feature `smtp`)
//! - [`FormRelay`]: forms-as-a-service HTTP endpoint via reqwest (feature `form-relay`)
//! - [`MemoryTransport`]: in-memory, for tests and local development

mod error;
#[cfg(feature = "form-relay")]
mod form_relay;
mod memory;
#[cfg(feature = "smtp")]
mod smtp;

use serde::Serialize;

pub use error::MailError;
#[cfg(feature = "form-relay")]
pub use form_relay::FormRelay;
pub use memory::MemoryTransport;
#[cfg(feature = "smtp")]
pub use smtp::{SmtpRelay, SmtpSettings};

/// A fully composed outbound email.
///
/// Addresses are plain `local@domain` strings; transports parse them and
/// report [`MailError::InvalidAddress`] when they do not. The body is
/// already-rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    /// Sender address (the service identity).
    pub from: String,
    /// Single recipient address.
    pub to: String,
    /// Optional `Reply-To` address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Subject line, plain text.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// A pluggable mail delivery backend.
///
/// `send` resolves once the relay has accepted or rejected the message.
/// Implementations never retry; a failed delivery is reported to the caller
/// as-is.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync + 'static {
    /// Deliver one email.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidAddress`] if an address cannot be parsed,
    /// [`MailError::Build`] if the message cannot be assembled, or
    /// [`MailError::Delivery`] if the relay rejects or cannot be reached.
    async fn send(&self, email: &Email) -> Result<(), MailError>;

    /// Check that the relay is reachable with the configured credentials.
    ///
    /// The default implementation reports success. Backends with a real
    /// connection override this.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Delivery`] if the relay cannot be reached.
    async fn probe(&self) -> Result<(), MailError> {
        Ok(())
    }

    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn email_json_uses_camel_case_and_omits_missing_reply_to() {
        let mut email = Email {
            from: "studio@example.com".to_owned(),
            to: "regina@example.com".to_owned(),
            reply_to: Some("anna@example.com".to_owned()),
            subject: "Hello".to_owned(),
            html: "<p>Hi</p>".to_owned(),
        };
        let json = serde_json::to_value(&email).unwrap();
        assert_eq!(json["replyTo"], "anna@example.com");

        email.reply_to = None;
        let json = serde_json::to_value(&email).unwrap();
        assert!(json.get("replyTo").is_none());
        assert!(json.get("reply_to").is_none());
    }
}
