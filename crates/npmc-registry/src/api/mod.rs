//! npm registry API response types

mod downloads;
mod package;
mod people;
mod search;
mod status;
mod version;

pub use downloads::{DailyDownloads, DownloadRangeStats, DownloadStats};
pub use package::PackageRecord;
pub use people::{Bugs, License, Person, Repository};
pub use search::{Links, Score, ScoreDetail, SearchObject, SearchPackage, SearchResult};
pub use status::{RegistryStatus, StorageSizes};
pub use version::{DistInfo, Scripts, Signature, VersionRecord};
