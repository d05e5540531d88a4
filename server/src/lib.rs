//! Balloon snapshot server library.
//!
//! Serves the user roster that balloon clients poll, plus endpoints to move
//! login recency around. Exposed as a library for tests and binaries.

pub mod config;
pub mod http;
pub mod roster;
