//! Error types and result aliases for npmc operations.
//!
//! Provides a unified error type that covers every failure the registry
//! client, the configuration loader and the CLI can report, with actionable
//! error messages.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for all npmc operations
#[derive(Error, Debug)]
pub enum NpmcError {
    // Transport errors
    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxyUrl { url: String, reason: String },

    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidRegistryUrl { url: String, reason: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    // Decoding errors
    #[error("Failed to decode registry response: {message}")]
    Decode {
        message: String,
        #[source]
        source: BoxError,
    },

    // Lookup errors
    #[error("Package '{name}' not found")]
    PackageNotFound { name: String },

    #[error("Version '{requested}' of package '{package}' not found")]
    VersionNotFound { package: String, requested: String },

    #[error("Invalid download period '{period}': expected last-day, last-week, last-month or YYYY-MM-DD:YYYY-MM-DD")]
    InvalidPeriod { period: String },

    #[error("Package '{package}' is inconsistent: {reason}")]
    InvalidRecord { package: String, reason: String },

    // Config errors
    #[error("Failed to parse {path}: {message} at line {line}, column {column}")]
    TomlParse {
        path: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for npmc operations
pub type NpmcResult<T> = Result<T, NpmcError>;

impl NpmcError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error, keeping the parser error as the source
    pub fn decode<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable by retrying the same call
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NpmcError::Network { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            NpmcError::InvalidProxyUrl { .. } => {
                Some("Proxy URLs need a scheme and host, e.g. http://proxy.example.com:8080")
            }
            NpmcError::InvalidRegistryUrl { .. } => {
                Some("Use an absolute registry URL such as https://registry.npmjs.org")
            }
            NpmcError::Network { .. } => Some("Check your internet connection and try again"),
            NpmcError::Decode { .. } => {
                Some("The registry returned a body that is not valid JSON; try another mirror")
            }
            NpmcError::PackageNotFound { .. } => {
                Some("Check the package name spelling, or try 'npmc search <query>'")
            }
            NpmcError::VersionNotFound { .. } => {
                Some("Run 'npmc info <package>' to list published versions and dist-tags")
            }
            NpmcError::InvalidPeriod { .. } => {
                Some("Use last-day, last-week, last-month or a range like 2024-01-01:2024-01-31")
            }
            _ => None,
        }
    }
}
