//! In-memory mail transport.
//!
//! Records every email it is asked to send instead of delivering it. Used by
//! unit and integration tests, and by the `memory` transport setting when
//! running the server locally without relay credentials. It can be switched
//! into a failing mode to exercise delivery-error paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::{Email, MailError, MailTransport};

/// A mail transport that keeps sent messages in a `Vec`.
///
/// Clones share the same outbox, so a test can hand one clone to the code
/// under test and inspect the other.
///
/// # Examples
///
/// ```
/// # use bridemark_mail::{Email, MailTransport, MemoryTransport};
/// # #[tokio::main]
/// # async fn main() {
/// let transport = MemoryTransport::new();
/// let email = Email {
///     from: "studio@example.com".to_owned(),
///     to: "owner@example.com".to_owned(),
///     reply_to: None,
///     subject: "Hello".to_owned(),
///     html: "<p>Hi</p>".to_owned(),
/// };
/// transport.send(&email).await.unwrap();
/// assert_eq!(transport.sent().await, vec![email]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    outbox: Arc<RwLock<Vec<Email>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryTransport {
    /// Create a transport with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that rejects every message.
    #[must_use]
    pub fn failing() -> Self {
        let transport = Self::new();
        transport.set_failing(true);
        transport
    }

    /// Toggle failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every email accepted so far, in send order.
    pub async fn sent(&self) -> Vec<Email> {
        self.outbox.read().await.clone()
    }
}

#[async_trait::async_trait]
impl MailTransport for MemoryTransport {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Delivery {
                transport: self.name(),
                reason: "memory transport is in failing mode".to_owned(),
            });
        }

        debug!(to = %email.to, subject = %email.subject, "email captured in memory");
        self.outbox.write().await.push(email.clone());
        Ok(())
    }

    async fn probe(&self) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Delivery {
                transport: self.name(),
                reason: "memory transport is in failing mode".to_owned(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
