//! Download counts from the npm downloads API

use serde::{Deserialize, Serialize};

use crate::decode::null_as_default;

/// Total downloads over a period (`/downloads/point/<period>/<package>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadStats {
    #[serde(deserialize_with = "null_as_default")]
    pub downloads: u64,
    /// First day of the period (YYYY-MM-DD)
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    /// Last day of the period (YYYY-MM-DD)
    #[serde(deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(deserialize_with = "null_as_default")]
    pub package: String,
    /// Set instead of the fields above when the API rejects the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-day downloads over a period (`/downloads/range/<period>/<package>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadRangeStats {
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(deserialize_with = "null_as_default")]
    pub package: String,
    /// One entry per day, oldest first
    #[serde(deserialize_with = "null_as_default")]
    pub downloads: Vec<DailyDownloads>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyDownloads {
    #[serde(deserialize_with = "null_as_default")]
    pub day: String,
    #[serde(deserialize_with = "null_as_default")]
    pub downloads: u64,
}

impl DownloadStats {
    /// True when the API answered with an error body or no data
    pub fn is_empty(&self) -> bool {
        self.package.is_empty()
    }
}

impl DownloadRangeStats {
    /// True when the API answered with an error body or no data
    pub fn is_empty(&self) -> bool {
        self.package.is_empty()
    }

    /// Sum of the daily counts
    pub fn total(&self) -> u64 {
        self.downloads.iter().map(|day| day.downloads).sum()
    }
}
