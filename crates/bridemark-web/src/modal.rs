//! Outcome modal shown after a contact submission.
//!
//! Every `show` starts a new generation. A success modal schedules an
//! auto-dismiss tagged with its generation, so a stale timer cannot close
//! a modal opened after it.

use std::time::Duration;

use crate::key::Key;

/// Success modals close themselves after this long.
pub const SUCCESS_AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// The result being reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    /// The server answered but refused or failed.
    Error(String),
    /// The request never got an answer.
    ConnectionError(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) | Self::ConnectionError(msg) => msg,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Success(_) => "Message Sent!",
            Self::Error(_) => "Something Went Wrong",
            Self::ConnectionError(_) => "Connection Error",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Success(_) => "modal-success",
            Self::Error(_) | Self::ConnectionError(_) => "modal-error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        self.is_success().then_some(SUCCESS_AUTO_DISMISS)
    }
}

/// How the user closed the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    Escape,
}

/// Handle for a scheduled auto-dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct OutcomeModal {
    current: Option<Outcome>,
    generation: u64,
}

impl OutcomeModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Outcome> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Show `outcome`, replacing any open modal.
    pub fn show(&mut self, outcome: Outcome) -> Generation {
        self.generation += 1;
        self.current = Some(outcome);
        Generation(self.generation)
    }

    /// User-initiated close. Returns false if nothing was open.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        tracing::debug!(?reason, "dismissing outcome modal");
        self.current.take().is_some()
    }

    /// Timer-initiated close; ignored unless `generation` is still showing.
    pub fn expire(&mut self, generation: Generation) -> bool {
        if generation.0 != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        key == Key::Escape && self.dismiss(DismissReason::Escape)
    }
}
