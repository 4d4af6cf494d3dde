//! Classi - terminal chat widget for the Bahamas customs classification
//! service.
//!
//! The widget answers HS-code and customs-process questions against the
//! classification backend. The crate follows a Pure Core / Impure Shell
//! architecture: all widget behavior lives in pure state transitions
//! ([`state::ChatState`]), and the TUI shell ([`view::TuiApp`]) owns the
//! terminal, the event loop, and the network workers.

pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod state;
pub mod transport;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
