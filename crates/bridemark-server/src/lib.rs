//! Bridemark HTTP server.
//!
//! Wires the contact pipeline, mail transport, and rate limiter into an
//! Axum router. The JSON API lives under `/api/*`; `/` describes the
//! service.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod transport;
