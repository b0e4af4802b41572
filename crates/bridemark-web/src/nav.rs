//! Navigation behaviors: scrolled navbar, in-page anchors, section reveal.

/// Scroll offset past which the navbar gets its `scrolled` class.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
pub const SCROLLED_CLASS: &str = "scrolled";

/// Intersection ratio at which a section counts as visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Shrinks the viewport bottom so sections reveal a little after entering.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const REVEAL_CLASS: &str = "fade-in";

/// Tracks whether the navbar is in its scrolled style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollNav {
    threshold: f64,
    scrolled: bool,
}

impl Default for ScrollNav {
    fn default() -> Self {
        Self::new(SCROLLED_THRESHOLD)
    }
}

impl ScrollNav {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current scroll offset. Returns the new state only when it
    /// changed, so the caller touches the DOM once per crossing.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

/// The selector an in-page anchor scrolls to, if it is one.
///
/// `#gallery` yields `Some("#gallery")`; a bare `#` or an external link
/// yields `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}
