//! Unified error type for the crate.
//!
//! Each subsystem reports its own error type; this module folds them into a
//! single [`Error`] so callers can use one `Result` alias end to end.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
