//! Forms-as-a-service relay transport.
//!
//! Some deployments have no SMTP account and forward submissions to a hosted
//! form endpoint instead. The composed [`Email`] is POSTed as JSON; any 2xx
//! status counts as delivered.

use std::time::Duration;

use tracing::debug;

use crate::{Email, MailError, MailTransport};

const NAME: &str = "form-relay";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A mail transport that forwards emails to an HTTP form endpoint.
#[derive(Debug, Clone)]
pub struct FormRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl FormRelay {
    /// Create a relay that posts to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Delivery`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Delivery {
                transport: NAME,
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for FormRelay {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(email)
            .send()
            .await
            .map_err(|e| MailError::Delivery {
                transport: NAME,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Delivery {
                transport: NAME,
                reason: format!("endpoint returned {status}: {body}"),
            });
        }

        debug!(to = %email.to, %status, "form endpoint accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
