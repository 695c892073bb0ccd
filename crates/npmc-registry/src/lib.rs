//! npm registry client for npmc
//!
//! This crate issues GET requests against an npm-compatible registry (and the
//! npm downloads API), and decodes the loosely-shaped JSON it returns into
//! typed records. Fields the registry sends in more than one shape (`bugs`,
//! `author`, `repository`, `license`) are normalized during decode, and keys
//! this crate does not model are kept in `other` maps instead of dropped.

pub mod api;
pub mod client;
pub mod decode;

// Re-export main types
pub use api::{
    Bugs, DailyDownloads, DistInfo, DownloadRangeStats, DownloadStats, License, Links,
    PackageRecord, Person, RegistryStatus, Repository, Score, ScoreDetail, Scripts,
    SearchObject, SearchPackage, SearchResult, Signature, StorageSizes, VersionRecord,
};
pub use client::{ClientOptions, Mirror, Period, RegistryClient};
pub use decode::{decode, decode_or_default};

use npmc_core::error::NpmcError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, NpmcError>;
