//! Auto-advancing slideshow without controls.

use std::time::Duration;

pub const SLIDE_INTERVAL: Duration = Duration::from_millis(4000);
pub const ACTIVE_CLASS: &str = "active";

/// Which slide loses and which gains the active class on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Slide index owned by one slideshow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    count: usize,
    current: usize,
    interval: Duration,
}

impl Slideshow {
    pub fn new(count: usize) -> Self {
        Self::with_interval(count, SLIDE_INTERVAL)
    }

    pub fn with_interval(count: usize, interval: Duration) -> Self {
        Self {
            count,
            current: 0,
            interval,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Move to the next slide, wrapping after the last. No-op without slides.
    pub fn advance(&mut self) -> Option<Transition> {
        if self.count == 0 {
            return None;
        }
        let from = self.current;
        self.current = (self.current + 1) % self.count;
        Some(Transition {
            from,
            to: self.current,
        })
    }
}
