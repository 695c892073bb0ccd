//! Per-version manifest inside a packument

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::people::{Bugs, License, Person, Repository};
use crate::decode::null_as_default;

/// Metadata for a specific package version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionRecord {
    /// Package name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Version string
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Main entry point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Scripts>,
    /// Dependencies
    #[serde(deserialize_with = "null_as_default")]
    pub dependencies: HashMap<String, String>,
    /// Dev dependencies
    #[serde(rename = "devDependencies", deserialize_with = "null_as_default")]
    pub dev_dependencies: HashMap<String, String>,
    /// Distribution information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<DistInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Bugs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub maintainers: Vec<Person>,
    /// Deprecation notice; `None` when the version is not deprecated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Document id, usually `name@version`
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_from", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// npm CLI version used to publish
    #[serde(rename = "_npmVersion", skip_serializing_if = "Option::is_none")]
    pub npm_version: Option<String>,
    /// Account that published this version
    #[serde(rename = "_npmUser", skip_serializing_if = "Option::is_none")]
    pub npm_user: Option<Person>,
    /// `directories` block, kept as sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directories: Option<Value>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Lifecycle scripts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scripts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Every other script, by name
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Distribution information for package tarball
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistInfo {
    /// SHA-1 checksum (legacy)
    #[serde(deserialize_with = "null_as_default")]
    pub shasum: String,
    /// Tarball download URL
    #[serde(deserialize_with = "null_as_default")]
    pub tarball: String,
    /// Subresource integrity hash (preferred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Registry signatures over `name@version:integrity`
    #[serde(deserialize_with = "null_as_default")]
    pub signatures: Vec<Signature>,
    /// File count
    #[serde(rename = "fileCount", skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    /// Unpackaged size in bytes
    #[serde(rename = "unpackedSize", skip_serializing_if = "Option::is_none")]
    pub unpacked_size: Option<u64>,
    /// Keys not modelled above (`npm-signature`, `attestations`, ...)
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// A registry signature entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    #[serde(deserialize_with = "null_as_default")]
    pub keyid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sig: String,
}

impl VersionRecord {
    /// Whether this version carries a deprecation notice
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_deref().is_some_and(|notice| !notice.is_empty())
    }

    /// Tarball URL, if the registry sent dist info
    pub fn tarball_url(&self) -> Option<&str> {
        self.dist
            .as_ref()
            .map(|dist| dist.tarball.as_str())
            .filter(|url| !url.is_empty())
    }
}
