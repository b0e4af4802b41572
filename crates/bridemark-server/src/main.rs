//! Bridemark server entry point.
//!
//! Loads configuration, builds the mail transport and contact pipeline,
//! then starts the Axum HTTP server with graceful shutdown. A background
//! sweeper prunes expired rate-limit windows and is cancelled on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info};

use bridemark_core::compose::MailSettings;
use bridemark_core::contact::ContactService;
use bridemark_core::ratelimit::RateLimiter;

use bridemark_server::config::ServerConfig;
use bridemark_server::routes;
use bridemark_server::state::AppState;
use bridemark_server::transport::{build_transport, probe_and_log};

/// Upper bound on how often the sweeper runs.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        environment = %config.environment,
        transport = ?config.mail.transport,
        "Bridemark starting"
    );

    let transport = build_transport(&config.mail.transport)
        .context("failed to build mail transport")?;

    // Probe once in the background; startup does not wait on the relay.
    tokio::spawn(probe_and_log(Arc::clone(&transport)));

    let contact = ContactService::new(
        transport,
        MailSettings {
            sender: config.mail.sender.clone(),
            recipient: config.mail.recipient.clone(),
            send_confirmation: config.mail.send_confirmation,
        },
    );
    let limiter = Arc::new(RateLimiter::new(config.rate_limit));

    let state = Arc::new(AppState {
        contact,
        limiter: Arc::clone(&limiter),
        environment: config.environment.clone(),
        trust_proxy: config.trust_proxy,
    });

    // Shutdown signal channel.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = {
        let mut rx = shutdown_rx.clone();
        let interval = config.rate_limit.window.min(MAX_SWEEP_INTERVAL);
        tokio::spawn(async move {
            limiter_sweeper(limiter, &mut rx, interval).await;
        })
    };

    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Bridemark server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown_tx))
    .await
    .context("server error")?;

    info!("waiting for background workers to stop");
    let _ = tokio::time::timeout(Duration::from_secs(10), sweeper_handle).await;

    info!("Bridemark server stopped");
    Ok(())
}

/// Background worker that drops expired rate-limit windows.
async fn limiter_sweeper(
    limiter: Arc<RateLimiter>,
    shutdown: &mut watch::Receiver<bool>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
    info!(interval_secs = interval.as_secs(), "rate-limit sweeper started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = limiter.prune();
                if removed > 0 {
                    debug!(removed, tracked = limiter.tracked(), "pruned expired rate-limit windows");
                }
            }
            _ = shutdown.changed() => {
                info!("rate-limit sweeper shutting down");
                return;
            }
        }
    }
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
