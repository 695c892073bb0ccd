//! npmc.toml configuration parsing and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use npmc_core::error::NpmcError;
use npmc_registry::{ClientOptions, Mirror};
use crate::ConfigResult;

/// Complete npmc.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NpmcToml {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistrySection,
}

/// `[registry]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistrySection {
    /// Registry base URL; takes precedence over `mirror`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Name of a well-known mirror (`npm`, `taobao`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,

    /// Downloads API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_url: Option<String>,

    /// Proxy every request goes through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RegistrySection {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Build client options from this section.
    ///
    /// `url` wins over `mirror`. The proxy is only validated later, when the
    /// client is built from the options.
    pub fn to_client_options(&self) -> ConfigResult<ClientOptions> {
        let mut options = match (&self.url, &self.mirror) {
            (Some(url), _) => ClientOptions::new().with_registry_url(url.as_str()),
            (None, Some(mirror)) => ClientOptions::for_mirror(mirror.parse::<Mirror>()?),
            (None, None) => ClientOptions::new(),
        };

        if let Some(downloads_url) = &self.downloads_url {
            options = options.with_downloads_url(downloads_url.as_str());
        }
        if let Some(proxy) = &self.proxy {
            options = options.with_proxy(proxy.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            options = options.with_timeout(Duration::from_secs(secs));
        }

        Ok(options)
    }
}

/// Parse TOML string to NpmcToml configuration.
///
/// `path` is only used to label errors.
pub fn parse_npmc_toml(content: &str, path: &str) -> ConfigResult<NpmcToml> {
    let config: NpmcToml = ::toml::from_str(content).map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| line_column(content, span.start))
            .unwrap_or((0, 0));
        NpmcError::TomlParse {
            path: path.to_string(),
            message: e.message().to_string(),
            line,
            column,
        }
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize NpmcToml to TOML string
pub fn serialize_npmc_toml(config: &NpmcToml) -> ConfigResult<String> {
    ::toml::to_string_pretty(config).map_err(|e| NpmcError::ConfigValidation {
        field: "npmc.toml".to_string(),
        reason: format!("TOML serialization error: {}", e),
    })
}

/// Validate field values the TOML types cannot express
pub fn validate_config(config: &NpmcToml) -> ConfigResult<()> {
    let registry = &config.registry;

    if let Some(url) = &registry.url {
        validate_base_url("registry.url", url)?;
    }
    if let Some(url) = &registry.downloads_url {
        validate_base_url("registry.downloads-url", url)?;
    }
    if let Some(mirror) = &registry.mirror {
        mirror.parse::<Mirror>()?;
    }
    if registry.timeout_secs == Some(0) {
        return Err(NpmcError::ConfigValidation {
            field: "registry.timeout-secs".to_string(),
            reason: "Timeout must be at least one second".to_string(),
        });
    }

    Ok(())
}

/// Load and parse npmc.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<NpmcToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| NpmcError::io(format!("Failed to read {}", path), e))?;

    parse_npmc_toml(&content, path.as_str())
}

/// Registry and downloads URLs must be absolute http(s) URLs
fn validate_base_url(field: &str, url: &str) -> ConfigResult<()> {
    let parsed = Url::parse(url).map_err(|e| NpmcError::ConfigValidation {
        field: field.to_string(),
        reason: format!("Invalid URL '{}': {}", url, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(NpmcError::ConfigValidation {
            field: field.to_string(),
            reason: format!("Unsupported scheme '{}' in '{}'", parsed.scheme(), url),
        });
    }

    Ok(())
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before.chars().count(), |newline| before[newline + 1..].chars().count())
        + 1;
    (line, column)
}
