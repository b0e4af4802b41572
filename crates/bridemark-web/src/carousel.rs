//! Testimonial carousel.
//!
//! The number of visible cards depends on the viewport width. The
//! position is the index of the leftmost visible card and is always in
//! `[0, max(0, total - visible)]`, including after a resize.

/// Viewport widths at which the visible count steps up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Below this width one card is shown.
    pub tablet: u32,
    /// Below this width two cards are shown; at or above, three.
    pub desktop: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: 768,
            desktop: 1024,
        }
    }
}

impl Breakpoints {
    pub fn visible_for(&self, width: u32) -> usize {
        if width < self.tablet {
            1
        } else if width < self.desktop {
            2
        } else {
            3
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    total: usize,
    visible: usize,
    position: usize,
    breakpoints: Breakpoints,
}

impl Carousel {
    pub fn new(total: usize, width: u32) -> Self {
        Self::with_breakpoints(total, width, Breakpoints::default())
    }

    pub fn with_breakpoints(total: usize, width: u32, breakpoints: Breakpoints) -> Self {
        Self {
            total,
            visible: breakpoints.visible_for(width),
            position: 0,
            breakpoints,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_position(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }

    pub fn can_next(&self) -> bool {
        self.position < self.max_position()
    }

    pub fn can_prev(&self) -> bool {
        self.position > 0
    }

    /// Advance one card. Stops at the end instead of wrapping.
    pub fn next(&mut self) -> usize {
        if self.can_next() {
            self.position += 1;
        }
        self.position
    }

    pub fn prev(&mut self) -> usize {
        self.position = self.position.saturating_sub(1);
        self.position
    }

    /// Jump to `index`, clamped into range.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.position = index.min(self.max_position());
        self.position
    }

    /// Recompute the visible count for a new viewport width and re-clamp.
    /// Returns true when the visible count changed.
    pub fn resize(&mut self, width: u32) -> bool {
        let visible = self.breakpoints.visible_for(width);
        let changed = visible != self.visible;
        self.visible = visible;
        self.position = self.position.min(self.max_position());
        changed
    }

    /// Track translation, as a percentage of the track width.
    pub fn offset_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let offset = self.position as f64 * 100.0 / self.visible as f64;
        -offset
    }
}
