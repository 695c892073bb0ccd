//! # npmc-core
//!
//! Error types shared by every npmc crate.
//!
//! The registry client, the configuration loader and the CLI all report
//! failures through [`NpmcError`], so callers can match on a single enum no
//! matter which layer failed.

pub mod error;

// Re-export commonly used types
pub use error::{NpmcError, NpmcResult};
