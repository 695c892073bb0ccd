//! Registry client: one async operation per registry endpoint

mod mirror;
mod options;
mod period;
mod transport;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use npmc_core::error::NpmcError;
use crate::api::{
    DownloadRangeStats, DownloadStats, PackageRecord, RegistryStatus, SearchResult, VersionRecord,
};
use crate::decode::{decode, decode_or_default};
use crate::RegistryResult;

pub use mirror::Mirror;
pub use options::{ClientOptions, DEFAULT_DOWNLOADS_URL, DEFAULT_REGISTRY_URL};
pub use period::Period;
pub use transport::{build_http_client, fetch, parse_proxy_url};

/// Page size used by [`RegistryClient::search`] when no positive limit is given
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Main HTTP client for npm registry operations
///
/// Cloning is cheap and clones share one connection pool. Operations never
/// retry; cancel one by dropping its future.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    options: ClientOptions,
}

impl RegistryClient {
    /// Create a client for the public npm registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_options(ClientOptions::default())
    }

    /// Create a client from explicit options.
    ///
    /// Fails with [`NpmcError::InvalidProxyUrl`] if the configured proxy
    /// cannot be parsed.
    pub fn with_options(options: ClientOptions) -> RegistryResult<Self> {
        let client = build_http_client(&options)?;
        Ok(Self { client, options })
    }

    /// Create a client for one of the well-known mirrors
    pub fn for_mirror(mirror: Mirror) -> RegistryResult<Self> {
        Self::with_options(ClientOptions::for_mirror(mirror))
    }

    /// Options this client was built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> RegistryResult<T> {
        let bytes = fetch(&self.client, url, self.options.timeout()).await?;
        decode(&bytes)
    }

    /// Fetch the registry root document
    pub async fn registry_status(&self) -> RegistryResult<RegistryStatus> {
        self.get_json(self.options.registry_url()).await
    }

    /// Fetch the full document of `name`.
    ///
    /// Unknown packages are not an error: registries answer them with an
    /// empty or error-shaped `200 OK` body, which yields a record for which
    /// [`PackageRecord::is_empty`] is true.
    pub async fn package(&self, name: &str) -> RegistryResult<PackageRecord> {
        let url = self.package_url(name);
        let bytes = fetch(&self.client, &url, self.options.timeout()).await?;
        let package: PackageRecord = decode_or_default(&bytes)?;

        if let Some(error) = package.upstream_error() {
            warn!(package = name, error, "registry returned an error-shaped body");
        }

        Ok(package)
    }

    /// Fetch one version of `name`, given either a dist-tag (`latest`) or an
    /// exact version string.
    pub async fn package_version(
        &self,
        name: &str,
        version_or_tag: &str,
    ) -> RegistryResult<VersionRecord> {
        let PackageRecord {
            dist_tags,
            mut versions,
            ..
        } = self.package(name).await?;

        let version = dist_tags
            .get(version_or_tag)
            .map(String::as_str)
            .unwrap_or(version_or_tag);

        versions.remove(version).ok_or_else(|| NpmcError::VersionNotFound {
            package: name.to_string(),
            requested: version_or_tag.to_string(),
        })
    }

    /// Search packages by text.
    ///
    /// A `limit` of zero or less asks for [`DEFAULT_SEARCH_LIMIT`] results.
    /// The query is sent as-is, even when empty.
    pub async fn search(&self, query: &str, limit: i32) -> RegistryResult<SearchResult> {
        let size = u32::try_from(limit)
            .ok()
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_SEARCH_LIMIT);
        let url = self.search_url(query, size)?;
        self.get_json(url.as_str()).await
    }

    /// Total downloads of `package` over `period`.
    ///
    /// `period` is validated before anything is sent; an unknown period
    /// fails with [`NpmcError::InvalidPeriod`].
    pub async fn download_stats(&self, package: &str, period: &str) -> RegistryResult<DownloadStats> {
        let period: Period = period.parse()?;
        let url = self.downloads_endpoint("point", &period, package);
        self.get_json(&url).await
    }

    /// Per-day downloads of `package` over `period`
    pub async fn download_range(
        &self,
        package: &str,
        period: &str,
    ) -> RegistryResult<DownloadRangeStats> {
        let period: Period = period.parse()?;
        let url = self.downloads_endpoint("range", &period, package);
        self.get_json(&url).await
    }

    fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.options.registry_url(), encode_package_name(name))
    }

    fn search_url(&self, query: &str, size: u32) -> RegistryResult<Url> {
        let endpoint = format!("{}/-/v1/search", self.options.registry_url());
        Url::parse_with_params(&endpoint, &[("text", query), ("size", &size.to_string())]).map_err(
            |e| NpmcError::InvalidRegistryUrl {
                url: self.options.registry_url().to_string(),
                reason: e.to_string(),
            },
        )
    }

    fn downloads_endpoint(&self, kind: &str, period: &Period, package: &str) -> String {
        format!(
            "{}/downloads/{}/{}/{}",
            self.options.downloads_url(),
            kind,
            period,
            package
        )
    }
}

/// Encode package name for URL (handle scoped packages)
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        // Scoped package: @org/pkg → @org%2fpkg
        name.replace('/', "%2f")
    } else {
        name.to_string()
    }
}
