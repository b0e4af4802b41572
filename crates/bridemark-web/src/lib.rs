//! Bridemark page script.
//!
//! Each widget on the page is a small state machine that owns its own
//! state and knows nothing about the DOM:
//!
//! - [`nav`]: scrolled-navbar toggle, smooth-scroll anchors, reveal options
//! - [`slideshow`]: timed auto-advance
//! - [`lightbox`]: gallery overlay with keyboard navigation
//! - [`carousel`]: testimonial strip with responsive visible count
//! - [`modal`]: submission outcome overlay
//! - [`submit`]: contact payload and response interpretation
//!
//! On `wasm32` the `dom` module registers event handlers for each widget
//! instance and drives these state machines from browser events.

pub mod carousel;
pub mod key;
pub mod lightbox;
pub mod modal;
pub mod nav;
pub mod slideshow;
pub mod submit;

// wasm-bindgen expansions contain unsafe blocks.
#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
mod dom;
