//! Core library for Bridemark.
//!
//! Implements the contact-form pipeline independent of any HTTP framework:
//!
//! 1. [`submission`]: the transient form payload and its validated form
//! 2. [`validate`]: field constraints, reported as a list of messages
//! 3. [`compose`]: HTML inquiry and confirmation emails, user input escaped
//! 4. [`contact`]: [`ContactService`](contact::ContactService), which runs
//!    validate → compose → deliver against a [`MailTransport`](bridemark_mail::MailTransport)
//!
//! [`ratelimit`] provides the fixed-window per-address throttle the server
//! places in front of the pipeline.

pub mod compose;
pub mod contact;
pub mod error;
pub mod ratelimit;
pub mod submission;
pub mod validate;
