//! Client configuration

use std::time::Duration;

use super::mirror::Mirror;

/// Default npm registry URL
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default npm downloads API URL
pub const DEFAULT_DOWNLOADS_URL: &str = "https://api.npmjs.org";

/// Where and how a [`RegistryClient`](super::RegistryClient) talks to the registry.
///
/// Options are immutable: every `with_*` call consumes the value and returns
/// an updated copy, so they can be chained and shared freely.
///
/// ```
/// use npmc_registry::ClientOptions;
///
/// let options = ClientOptions::new()
///     .with_registry_url("https://registry.npmmirror.com")
///     .with_proxy("http://proxy.example.com:8080");
/// assert_eq!(options.proxy(), Some("http://proxy.example.com:8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    registry_url: String,
    downloads_url: String,
    proxy: Option<String>,
    timeout: Option<Duration>,
}

impl ClientOptions {
    /// Options for the public npm registry, no proxy, no timeout
    pub fn new() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            downloads_url: DEFAULT_DOWNLOADS_URL.to_string(),
            proxy: None,
            timeout: None,
        }
    }

    /// Options pointing at a named mirror
    pub fn for_mirror(mirror: Mirror) -> Self {
        Self::new().with_registry_url(mirror.url())
    }

    /// Set the registry base URL. Trailing slashes are dropped.
    pub fn with_registry_url(self, url: impl Into<String>) -> Self {
        Self {
            registry_url: trim_base(url.into()),
            ..self
        }
    }

    /// Set the downloads API base URL. Trailing slashes are dropped.
    pub fn with_downloads_url(self, url: impl Into<String>) -> Self {
        Self {
            downloads_url: trim_base(url.into()),
            ..self
        }
    }

    /// Route every request through `proxy`. An empty string clears the proxy.
    ///
    /// The URL is validated when the client is built, not here.
    pub fn with_proxy(self, proxy: impl Into<String>) -> Self {
        let proxy = proxy.into();
        Self {
            proxy: (!proxy.is_empty()).then_some(proxy),
            ..self
        }
    }

    /// Bound every request (connect, send and body) by `timeout`
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Registry base URL, without trailing slash
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Downloads API base URL, without trailing slash
    pub fn downloads_url(&self) -> &str {
        &self.downloads_url
    }

    /// Proxy URL, if one is configured
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Per-request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
