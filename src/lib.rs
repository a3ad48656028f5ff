//! Chat relay for a safety-assessment API, plus the widget that talks to it.
//!
//! The relay (`web`, `upstream`) accepts one JSON message, validates it,
//! forwards it upstream with the secret key header and relays the answer.
//! The widget (`widget`) keeps the transcript, formats replies and calls
//! the relay.

pub mod config;
pub mod error;
pub mod upstream;
pub mod web;
pub mod widget;
