//! Configuration for the npmc registry client
//!
//! This crate reads npmc.toml files (project and global), layers environment
//! variables and command-line flags on top, and turns the result into
//! [`npmc_registry::ClientOptions`].

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource};
pub use toml::{NpmcToml, RegistrySection};

use npmc_core::error::NpmcError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, NpmcError>;
