//! Mail transport selection.
//!
//! Turns the configured [`TransportKind`] into a shared
//! [`MailTransport`]. Backends compiled out by feature flags are reported
//! as errors rather than silently replaced.

use std::sync::Arc;

use bridemark_mail::{MailTransport, MemoryTransport};
use tracing::{info, warn};

use crate::config::TransportKind;

/// Build the transport named by the configuration.
///
/// # Errors
///
/// Returns an error if the backend's feature is not enabled or the backend
/// cannot be constructed.
pub fn build_transport(kind: &TransportKind) -> anyhow::Result<Arc<dyn MailTransport>> {
    match kind {
        #[cfg(feature = "smtp")]
        TransportKind::Smtp {
            host,
            port,
            username,
            password,
        } => {
            info!(host = %host, port, "using SMTP relay");
            let relay = bridemark_mail::SmtpRelay::new(&bridemark_mail::SmtpSettings {
                host: host.clone(),
                port: *port,
                username: username.clone(),
                password: password.clone(),
            })?;
            Ok(Arc::new(relay))
        }
        #[cfg(not(feature = "smtp"))]
        TransportKind::Smtp { .. } => {
            anyhow::bail!("SMTP transport requested but feature 'smtp' is not enabled");
        }
        #[cfg(feature = "form-relay")]
        TransportKind::Form { endpoint } => {
            info!(endpoint = %endpoint, "using form relay");
            Ok(Arc::new(bridemark_mail::FormRelay::new(endpoint.clone())?))
        }
        #[cfg(not(feature = "form-relay"))]
        TransportKind::Form { .. } => {
            anyhow::bail!("form transport requested but feature 'form-relay' is not enabled");
        }
        TransportKind::Memory => {
            warn!("using in-memory mail transport (nothing will be delivered)");
            Ok(Arc::new(MemoryTransport::new()))
        }
    }
}

/// Check relay connectivity once and log the result. Never fails.
pub async fn probe_and_log(transport: Arc<dyn MailTransport>) {
    match transport.probe().await {
        Ok(()) => info!(transport = transport.name(), "mail transport is ready"),
        Err(e) => warn!(
            transport = transport.name(),
            error = %e,
            "mail transport probe failed; submissions may not be delivered"
        ),
    }
}
