//! Fixed-window, per-address request throttling.
//!
//! Each source address gets a window that opens on its first request and
//! lasts [`RateLimitConfig::window`]. Up to [`RateLimitConfig::max_requests`]
//! requests are admitted inside the window; the next one is refused until
//! the window elapses, at which point the count starts over.
//!
//! Counters live in a [`DashMap`]; the entry guard makes the
//! check-and-increment for one address atomic without a global lock.
//! [`RateLimiter::prune`] drops windows that have expired so idle addresses
//! do not accumulate.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Throttle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Length of one counting window.
    pub window: Duration,
    /// Requests admitted per address per window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes.
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_requests: 100,
        }
    }
}

/// Result of [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Admitted; `remaining` more requests fit in the current window.
    Allowed { remaining: u32 },
    /// Refused; the window reopens after `retry_after`.
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    opened_at: Instant,
    count: u32,
}

/// Per-address fixed-window counter.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: DashMap<IpAddr, Window>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count a request from `addr` at the current instant.
    pub fn check(&self, addr: IpAddr) -> RateDecision {
        self.check_at(addr, Instant::now())
    }

    /// Count a request from `addr` at `now`.
    ///
    /// `now` must not go backwards for a given address; a non-monotonic
    /// clock is treated as "still inside the window".
    pub fn check_at(&self, addr: IpAddr, now: Instant) -> RateDecision {
        let mut window = self.windows.entry(addr).or_insert(Window {
            opened_at: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.opened_at);
        if elapsed >= self.config.window {
            *window = Window {
                opened_at: now,
                count: 0,
            };
        }

        if window.count >= self.config.max_requests {
            let retry_after = self
                .config
                .window
                .saturating_sub(now.saturating_duration_since(window.opened_at));
            return RateDecision::Limited { retry_after };
        }

        window.count = window.count.saturating_add(1);
        RateDecision::Allowed {
            remaining: self.config.max_requests.saturating_sub(window.count),
        }
    }

    /// Remove windows that expired before `now`. Returns how many were removed.
    pub fn prune_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.opened_at) < self.config.window);
        before.saturating_sub(self.windows.len())
    }

    /// Remove windows that have already expired.
    pub fn prune(&self) -> usize {
        self.prune_at(Instant::now())
    }

    /// Number of addresses currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}
