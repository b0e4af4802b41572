//! Rate-limit middleware for Bridemark.
//!
//! Resolves the client address, counts the request against the shared
//! [`RateLimiter`](bridemark_core::ratelimit::RateLimiter), and short-circuits
//! with `429 Too Many Requests` before the handler runs when the address is
//! over its budget.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use bridemark_core::ratelimit::RateDecision;

use crate::error::AppError;
use crate::state::AppState;

/// Client address resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(pub IpAddr);

/// Middleware that throttles requests per client address.
///
/// The resolved [`ClientAddr`] is inserted into request extensions for
/// downstream handlers.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let addr = client_addr(req.headers(), peer, state.trust_proxy);

    match state.limiter.check(addr) {
        RateDecision::Allowed { remaining } => {
            debug!(client = %addr, remaining, "request admitted");
            req.extensions_mut().insert(ClientAddr(addr));
            next.run(req).await
        }
        RateDecision::Limited { retry_after } => {
            warn!(
                client = %addr,
                retry_after_secs = retry_after.as_secs(),
                "contact request throttled"
            );
            AppError::TooManyRequests { retry_after }.into_response()
        }
    }
}

/// Work out which address a request should be counted against.
///
/// With `trust_proxy`, the first valid hop of `X-Forwarded-For` wins.
/// Otherwise the socket peer is used. Requests with neither (e.g. in-process
/// tests without connect info) share the unspecified address.
pub fn client_addr(headers: &HeaderMap, peer: Option<IpAddr>, trust_proxy: bool) -> IpAddr {
    if trust_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if let Some(addr) = forwarded {
            return addr;
        }
    }

    peer.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
