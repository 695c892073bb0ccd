//! Full package document (packument)

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::people::{Bugs, License, Person, Repository};
use super::version::VersionRecord;
use crate::decode::null_as_default;
use crate::RegistryResult;
use npmc_core::error::NpmcError;

/// Package document returned by `GET /<name>`
///
/// Registries answer lookups of unknown packages with `200 OK` and an empty
/// or error-shaped body, which decodes to an empty record rather than an
/// error. Use [`PackageRecord::is_empty`] to detect "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// CouchDB revision
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Package name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Package description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tag name → version, e.g. `latest` → `4.17.21`
    #[serde(rename = "dist-tags", deserialize_with = "null_as_default")]
    pub dist_tags: HashMap<String, String>,
    /// All versions metadata
    #[serde(deserialize_with = "null_as_default")]
    pub versions: HashMap<String, VersionRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub maintainers: Vec<Person>,
    /// Version or lifecycle marker (`created`, `modified`) → timestamp.
    ///
    /// Values are RFC 3339 strings, except `unpublished` which is an object.
    #[serde(deserialize_with = "null_as_default")]
    pub time: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Bugs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(rename = "readmeFilename", skip_serializing_if = "Option::is_none")]
    pub readme_filename: Option<String>,
    /// Users who starred the package
    #[serde(deserialize_with = "null_as_default")]
    pub users: HashMap<String, bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub contributors: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl PackageRecord {
    /// True when the registry returned nothing usable (unknown package,
    /// error-shaped body, empty body).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.versions.is_empty()
    }

    /// The `error` message of an error-shaped body, e.g. `"Not found"`
    pub fn upstream_error(&self) -> Option<&str> {
        self.other.get("error").and_then(Value::as_str)
    }

    /// Version the `latest` dist-tag points at
    pub fn latest_version(&self) -> Option<&VersionRecord> {
        self.resolve_version("latest")
    }

    /// Resolve a dist-tag or an exact version string.
    ///
    /// Known dist-tags take precedence over a version key of the same name.
    pub fn resolve_version(&self, version_or_tag: &str) -> Option<&VersionRecord> {
        match self.dist_tags.get(version_or_tag) {
            Some(version) => self.versions.get(version),
            None => self.versions.get(version_or_tag),
        }
    }

    /// Publish time of `version` (or of a lifecycle marker like `modified`)
    pub fn published_at(&self, version: &str) -> Option<DateTime<Utc>> {
        let raw = self.time.get(version)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }

    /// Check the record against the packument invariants: every `versions`
    /// key is a valid semver string and `dist-tags.latest` names a published
    /// version.
    pub fn validate(&self) -> RegistryResult<()> {
        let mut bad_keys: Vec<&str> = self
            .versions
            .keys()
            .filter(|key| semver::Version::parse(key).is_err())
            .map(String::as_str)
            .collect();
        if !bad_keys.is_empty() {
            bad_keys.sort_unstable();
            return Err(NpmcError::InvalidRecord {
                package: self.name.clone(),
                reason: format!("versions contains non-semver keys: {}", bad_keys.join(", ")),
            });
        }

        if let Some(latest) = self.dist_tags.get("latest") {
            if !self.versions.contains_key(latest) {
                return Err(NpmcError::InvalidRecord {
                    package: self.name.clone(),
                    reason: format!("dist-tags.latest points at unpublished version {}", latest),
                });
            }
        }

        Ok(())
    }
}
