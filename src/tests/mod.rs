//! Internal test modules - whitebox tests with crate access.
//!
//! Tests here can reach private items and use the test harness, covering
//! full user flows rather than individual transitions.

// Harness-based acceptance tests
mod acceptance_quick_actions;

// Property tests over the pure state core
mod chat_properties;
