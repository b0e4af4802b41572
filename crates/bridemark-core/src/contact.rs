//! The contact pipeline: validate → compose → deliver.
//!
//! [`ContactService`] is constructed once at startup and shared by every
//! request. It holds no per-request state; each call to
//! [`submit`](ContactService::submit) either returns a [`Receipt`] or a
//! [`ContactError`]. Validation failures never reach the transport.

use std::sync::Arc;

use bridemark_mail::MailTransport;
use tracing::{info, warn};

use crate::compose::{MailSettings, compose};
use crate::error::ContactError;
use crate::submission::{Submission, ValidSubmission};

/// Outcome of a delivered submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// Whether a confirmation was attempted and accepted by the relay.
    pub confirmation_sent: bool,
}

/// Runs submissions through the pipeline against a mail transport.
#[derive(Clone)]
pub struct ContactService {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService")
            .field("transport", &self.transport.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ContactService {
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// The transport this service delivers through.
    pub fn transport(&self) -> &Arc<dyn MailTransport> {
        &self.transport
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Validate, compose, and deliver one submission.
    ///
    /// The inquiry is sent first. A failed confirmation is logged and
    /// reported through [`Receipt::confirmation_sent`] but does not fail the
    /// submission: the studio already has the inquiry.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Invalid`] with every violated constraint, or
    /// [`ContactError::Delivery`] if the inquiry could not be delivered.
    pub async fn submit(&self, submission: Submission) -> Result<Receipt, ContactError> {
        let submission = ValidSubmission::try_from(submission)?;
        let mail = compose(&submission, &self.settings);

        self.transport.send(&mail.inquiry).await?;
        info!(
            transport = self.transport.name(),
            sender_domain = submission.email_domain(),
            "inquiry delivered"
        );

        let Some(confirmation) = mail.confirmation else {
            return Ok(Receipt {
                confirmation_sent: false,
            });
        };

        let confirmation_sent = match self.transport.send(&confirmation).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "confirmation email failed after inquiry was delivered");
                false
            }
        };

        Ok(Receipt { confirmation_sent })
    }
}
