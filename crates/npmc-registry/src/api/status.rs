//! Registry root document (`GET /`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{lenient_u64, null_as_default};

/// Database status reported by the registry root endpoint
///
/// The npm registry is backed by CouchDB, so this mirrors CouchDB's database
/// info document. Counters are never negative; missing or `null` fields
/// decode to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryStatus {
    /// Database name
    #[serde(deserialize_with = "null_as_default")]
    pub db_name: String,
    /// Storage engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Number of live documents (packages)
    #[serde(deserialize_with = "lenient_u64")]
    pub doc_count: u64,
    /// Number of deleted documents
    #[serde(deserialize_with = "lenient_u64")]
    pub doc_del_count: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub update_seq: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub purge_seq: u64,
    /// Whether a compaction is in progress
    #[serde(deserialize_with = "null_as_default")]
    pub compact_running: bool,
    /// Storage breakdown in bytes
    #[serde(deserialize_with = "null_as_default")]
    pub sizes: StorageSizes,
    #[serde(deserialize_with = "lenient_u64")]
    pub disk_size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub data_size: u64,
    /// Instance start time (microseconds since epoch, as sent)
    #[serde(deserialize_with = "null_as_default")]
    pub instance_start_time: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub disk_format_version: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub committed_update_seq: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub compacted_seq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Storage sizes in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSizes {
    #[serde(deserialize_with = "lenient_u64")]
    pub file: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub active: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub external: u64,
}
