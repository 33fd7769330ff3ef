//! Unified error types for Longan.
//!
//! Every stage of the export pipeline (layout, serialization, download,
//! persistence) reports failures through a single error type so callers can
//! match on the kind of failure without caring which stage produced it.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
