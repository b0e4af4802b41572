//! Gallery lightbox.
//!
//! Opening on an image shows it full-size; next and prev wrap around the
//! gallery in both directions. Arrow keys navigate and Escape closes while
//! the lightbox is open; keys are ignored while it is closed.

use crate::key::Key;

/// What a handled key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    /// Now showing this index.
    Showing(usize),
    Closed,
}

/// Lightbox state for one gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    count: usize,
    current: usize,
    open: bool,
}

impl Lightbox {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: 0,
            open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Open on `index`. Out-of-range indices are refused.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.current = index;
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Step forward, wrapping to the first image.
    pub fn next(&mut self) -> Option<usize> {
        if !self.open || self.count == 0 {
            return None;
        }
        self.current = (self.current + 1) % self.count;
        Some(self.current)
    }

    /// Step back, wrapping to the last image.
    pub fn prev(&mut self) -> Option<usize> {
        if !self.open || self.count == 0 {
            return None;
        }
        self.current = (self.current + self.count - 1) % self.count;
        Some(self.current)
    }

    /// React to a key press. `None` means the key was not for us.
    pub fn handle_key(&mut self, key: Key) -> Option<LightboxEvent> {
        if !self.open {
            return None;
        }
        match key {
            Key::Escape => {
                self.close();
                Some(LightboxEvent::Closed)
            }
            Key::ArrowLeft => self.prev().map(LightboxEvent::Showing),
            Key::ArrowRight => self.next().map(LightboxEvent::Showing),
            Key::Other => None,
        }
    }
}
