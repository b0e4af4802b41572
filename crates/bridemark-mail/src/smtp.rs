//! SMTP relay transport, the production default.
//!
//! Wraps lettre's async SMTP transport behind the [`MailTransport`] trait.
//! Authentication uses a single credential pair (account address + app
//! secret). Port 587 negotiates STARTTLS; any other port uses implicit TLS.
//!
//! Message assembly happens here, not in the composer: the composer deals in
//! plain strings and this module turns them into RFC 5322 messages.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::{Email, MailError, MailTransport};

const NAME: &str = "smtp";
const STARTTLS_PORT: u16 = 587;

/// Connection settings for [`SmtpRelay`].
#[derive(Clone)]
pub struct SmtpSettings {
    /// Relay hostname (e.g. `smtp.gmail.com`).
    pub host: String,
    /// Relay port. `587` selects STARTTLS, everything else implicit TLS.
    pub port: u16,
    /// Account address used for authentication.
    pub username: String,
    /// Account secret (app password).
    pub password: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A mail transport backed by an authenticated SMTP relay.
///
/// The underlying lettre transport pools connections internally, so a single
/// `SmtpRelay` is shared by every request.
///
/// # Examples
///
/// ```no_run
/// # use bridemark_mail::{SmtpRelay, SmtpSettings};
/// let relay = SmtpRelay::new(&SmtpSettings {
///     host: "smtp.gmail.com".to_owned(),
///     port: 465,
///     username: "studio@example.com".to_owned(),
///     password: "app-password".to_owned(),
/// })
/// .unwrap();
/// ```
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl std::fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl SmtpRelay {
    /// Build a relay transport from connection settings.
    ///
    /// No network traffic happens here; use [`MailTransport::probe`] to
    /// check connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Delivery`] if lettre rejects the relay host
    /// (e.g. TLS parameters cannot be built for it).
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let builder = if settings.port == STARTTLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        }
        .map_err(|e| MailError::Delivery {
            transport: NAME,
            reason: format!("invalid relay '{}': {e}", settings.host),
        })?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            host: settings.host.clone(),
            port: settings.port,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpRelay {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Delivery {
                transport: NAME,
                reason: e.to_string(),
            })?;

        debug!(to = %email.to, code = %response.code(), "relay accepted message");
        Ok(())
    }

    async fn probe(&self) -> Result<(), MailError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Delivery {
                transport: NAME,
                reason: format!("relay {}:{} did not accept a connection", self.host, self.port),
            }),
            Err(e) => Err(MailError::Delivery {
                transport: NAME,
                reason: e.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_owned(),
            reason: e.to_string(),
        })
}

/// Assemble an HTML message from a composed [`Email`].
fn build_message(email: &Email) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML);

    // A bad Reply-To must not cost the owner the inquiry.
    if let Some(reply_to) = &email.reply_to {
        match parse_mailbox(reply_to) {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => warn!(error = %e, "omitting unparseable Reply-To"),
        }
    }

    builder
        .body(email.html.clone())
        .map_err(|e| MailError::Build {
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            from: "studio@example.com".to_owned(),
            to: "owner@example.com".to_owned(),
            reply_to: Some("bride@example.com".to_owned()),
            subject: "New Contact Form Submission from Anna".to_owned(),
            html: "<p>Hello</p>".to_owned(),
        }
    }

    #[test]
    fn build_message_sets_html_and_reply_to() {
        let message = build_message(&email()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Reply-To: bride@example.com"), "{raw}");
        assert!(raw.contains("To: owner@example.com"), "{raw}");
        assert!(raw.contains("text/html"), "{raw}");
        assert!(raw.contains("<p>Hello</p>"), "{raw}");
    }

    #[test]
    fn build_message_without_reply_to() {
        let mut email = email();
        email.reply_to = None;
        let raw = String::from_utf8(build_message(&email).unwrap().formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn unparseable_reply_to_is_omitted() {
        for reply_to in ["anna,smith@example.com", "anna<x>@example.com", "ann(a)@example.com"] {
            let mut email = email();
            email.reply_to = Some(reply_to.to_owned());
            let message = build_message(&email).unwrap();
            let raw = String::from_utf8(message.formatted()).unwrap();
            assert!(!raw.contains("Reply-To"), "{reply_to}: {raw}");
            assert!(raw.contains("To: owner@example.com"), "{raw}");
        }
    }

    #[test]
    fn invalid_recipient_is_reported() {
        let mut email = email();
        email.to = "not an address".to_owned();
        let result = build_message(&email);
        assert!(matches!(
            result,
            Err(MailError::InvalidAddress { ref address, .. }) if address == "not an address"
        ));
    }

    #[test]
    fn settings_debug_redacts_password() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_owned(),
            port: 465,
            username: "studio@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }
}
