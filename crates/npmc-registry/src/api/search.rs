//! Search endpoint (`GET /-/v1/search`)

use serde::{Deserialize, Serialize};

use super::people::Person;
use crate::decode::null_as_default;

/// Search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Matches, best first
    #[serde(deserialize_with = "null_as_default")]
    pub objects: Vec<SearchObject>,
    /// Total number of matches (not just the returned page)
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    /// Server-side time the search ran at
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
}

/// A single search hit
///
/// `score.final_score` is the registry's quality/popularity/maintenance
/// blend; `search_score` is the relevance of this hit to the query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchObject {
    #[serde(deserialize_with = "null_as_default")]
    pub package: SearchPackage,
    #[serde(deserialize_with = "null_as_default")]
    pub score: Score,
    #[serde(rename = "searchScore", deserialize_with = "null_as_default")]
    pub search_score: f64,
}

/// Package summary inside a search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPackage {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Scope without the `@`, or `unscoped`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// Publish date of `version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Person>,
    #[serde(deserialize_with = "null_as_default")]
    pub maintainers: Vec<Person>,
}

/// Related links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<String>,
}

/// Score breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    #[serde(rename = "final", deserialize_with = "null_as_default")]
    pub final_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub detail: ScoreDetail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub quality: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub maintenance: f64,
}
