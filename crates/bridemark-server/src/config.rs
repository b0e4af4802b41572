//! Server configuration for Bridemark.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Malformed numeric or boolean values fall back to their defaults; missing
//! credentials for the selected mail transport are an error.

use std::net::SocketAddr;
use std::time::Duration;

use bridemark_core::ratelimit::RateLimitConfig;

const DEFAULT_PORT: u16 = 5501;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const LOCAL_SENDER: &str = "noreply@localhost";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Runtime environment label reported by `/` and `/api/health`.
    pub environment: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Mail transport and addresses.
    pub mail: MailConfig,
    /// Per-address throttle for the contact route.
    pub rate_limit: RateLimitConfig,
    /// Whether to take the client address from `X-Forwarded-For`.
    pub trust_proxy: bool,
}

/// Addresses and delivery backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Service identity used as `From`.
    pub sender: String,
    /// Inbox receiving inquiries.
    pub recipient: String,
    /// Whether visitors get a confirmation copy.
    pub send_confirmation: bool,
    /// Which backend delivers the mail.
    pub transport: TransportKind,
}

/// Supported mail transports.
#[derive(Clone, PartialEq, Eq)]
pub enum TransportKind {
    /// Authenticated SMTP relay.
    Smtp {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
    /// Forms-as-a-service HTTP endpoint.
    Form { endpoint: String },
    /// In-memory capture (development only, nothing is delivered).
    Memory,
}

impl std::fmt::Debug for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smtp {
                host,
                port,
                username,
                ..
            } => f
                .debug_struct("Smtp")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("password", &"[redacted]")
                .finish(),
            Self::Form { endpoint } => f.debug_struct("Form").field("endpoint", endpoint).finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Configuration errors that prevent startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable required by the selected transport is unset or empty.
    #[error("{var} must be set when MAIL_TRANSPORT={transport}")]
    Missing {
        var: &'static str,
        transport: &'static str,
    },

    /// `MAIL_TRANSPORT` names an unknown backend.
    #[error("unknown MAIL_TRANSPORT '{value}' (expected smtp, form, or memory)")]
    UnknownTransport { value: String },
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BRIDEMARK_BIND_ADDR`: full bind address (overrides `PORT`)
    /// - `PORT`: port to bind on `0.0.0.0` (default: `5501`)
    /// - `APP_ENV`: environment label (default: `development`)
    /// - `LOG_LEVEL`: log filter (default: `info`)
    /// - `MAIL_TRANSPORT`: `smtp`, `form`, or `memory` (default: `smtp`)
    /// - `EMAIL_USER` / `EMAIL_PASS`: relay credentials; `EMAIL_USER` is also the sender
    /// - `RECIPIENT_EMAIL`: inbox override (default: `EMAIL_USER`)
    /// - `SMTP_HOST` / `SMTP_PORT`: relay (default: `smtp.gmail.com` / `465`)
    /// - `FORM_ENDPOINT`: URL for the `form` transport
    /// - `SEND_CONFIRMATION`: send visitors a copy (default: `true`)
    /// - `RATE_LIMIT_WINDOW_SECS` / `RATE_LIMIT_MAX`: throttle (default: `900` / `100`)
    /// - `TRUST_PROXY`: honour `X-Forwarded-For` (default: `false`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the selected transport is missing its
    /// credentials or endpoint.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Priority: BRIDEMARK_BIND_ADDR > PORT > default 0.0.0.0:5501
        let default_addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
        let bind_addr = if let Some(addr) = var("BRIDEMARK_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = var("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(DEFAULT_PORT)))
        } else {
            default_addr
        };

        let environment = var("APP_ENV").unwrap_or_else(|| "development".to_owned());
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let email_user = var("EMAIL_USER");
        let transport = match var("MAIL_TRANSPORT")
            .unwrap_or_else(|| "smtp".to_owned())
            .to_lowercase()
            .as_str()
        {
            "smtp" => TransportKind::Smtp {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned()),
                port: var("SMTP_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                username: email_user.clone().ok_or(ConfigError::Missing {
                    var: "EMAIL_USER",
                    transport: "smtp",
                })?,
                password: var("EMAIL_PASS").ok_or(ConfigError::Missing {
                    var: "EMAIL_PASS",
                    transport: "smtp",
                })?,
            },
            "form" => TransportKind::Form {
                endpoint: var("FORM_ENDPOINT").ok_or(ConfigError::Missing {
                    var: "FORM_ENDPOINT",
                    transport: "form",
                })?,
            },
            "memory" => TransportKind::Memory,
            other => {
                return Err(ConfigError::UnknownTransport {
                    value: other.to_owned(),
                });
            }
        };

        let sender = email_user.unwrap_or_else(|| LOCAL_SENDER.to_owned());
        let recipient = var("RECIPIENT_EMAIL").unwrap_or_else(|| sender.clone());
        let send_confirmation = var("SEND_CONFIRMATION")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            window: var("RATE_LIMIT_WINDOW_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(defaults.window, Duration::from_secs),
            max_requests: var("RATE_LIMIT_MAX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_requests),
        };

        let trust_proxy = var("TRUST_PROXY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            environment,
            log_level,
            mail: MailConfig {
                sender,
                recipient,
                send_confirmation,
                transport,
            },
            rate_limit,
            trust_proxy,
        })
    }
}
