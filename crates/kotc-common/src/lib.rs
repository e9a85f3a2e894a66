//! Common types and utilities for the kotc collections runtime.
//!
//! This crate provides foundational types used across all kotc crates:
//! - String interning (`Atom`, `Interner`)
//! - Centralized limits and thresholds
//! - Message templates and formatting for runtime errors

// String interning for class and type-parameter names
pub mod interner;
pub use interner::{Atom, Interner};
#[cfg(test)]
#[path = "tests/interner_tests.rs"]
mod interner_tests;

// Centralized limits and thresholds
pub mod limits;

// Message templates shared by the solver and the containers
pub mod messages;
pub use messages::{MessageTemplate, format_message};
#[cfg(test)]
#[path = "tests/messages_tests.rs"]
mod messages_tests;
