//! Configuration layering, file discovery, and environment overrides

use std::collections::HashMap;

use camino::Utf8PathBuf;
use tracing::{debug, warn};
use url::Url;

use npmc_core::error::NpmcError;
use npmc_registry::client::parse_proxy_url;
use crate::toml::{NpmcToml, RegistrySection};
use crate::ConfigResult;

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "npmc.toml";

/// Proxy variables consulted when no layer sets a proxy, in order
const PROXY_ENV_FALLBACKS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// Hosts that bypass the proxy variables above
const NO_PROXY_ENV: [&str; 2] = ["NO_PROXY", "no_proxy"];

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Home directory holding `.npmc/config.toml`
    home: Option<Utf8PathBuf>,
}

/// Configuration layering and merging
#[derive(Debug, Clone, Default)]
pub struct ConfigLayering {
    /// Global configuration
    global_config: Option<NpmcToml>,
    /// Project configuration
    project_config: Option<NpmcToml>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// CLI flag overrides
    cli_overrides: HashMap<String, String>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project npmc.toml file
    Project(Utf8PathBuf),
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        let home = dirs::home_dir().and_then(|home| Utf8PathBuf::try_from(home).ok());
        Self { cwd, home }
    }

    /// Use `home` instead of the user's home directory
    pub fn with_home_dir(self, home: Option<Utf8PathBuf>) -> Self {
        Self { home, ..self }
    }

    /// Load the nearest npmc.toml, if there is one
    pub async fn load_project_config(&self) -> ConfigResult<Option<(NpmcToml, ConfigSource)>> {
        let path = self.resolve_config_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(None);
        }

        let config = crate::toml::load_from_file(&path).await?;
        Ok(Some((config, ConfigSource::Project(path))))
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.is_file() {
                return Ok(config_path);
            }

            // Move up one directory
            if let Some(parent) = current.parent() {
                current = parent;
            } else {
                // Reached filesystem root
                break;
            }
        }

        // Return path in current directory even if it doesn't exist
        Ok(self.cwd.join(filename))
    }

    /// Path of the global configuration file
    pub fn global_config_path(&self) -> Option<Utf8PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(".npmc").join("config.toml"))
    }

    /// Load global configuration
    pub async fn load_global_config(&self) -> ConfigResult<Option<(NpmcToml, ConfigSource)>> {
        let Some(path) = self.global_config_path() else {
            return Ok(None);
        };

        if path.is_file() {
            let config = crate::toml::load_from_file(&path).await?;
            Ok(Some((config, ConfigSource::Global(path))))
        } else {
            Ok(None)
        }
    }

    /// Load both files and layer `env` and `cli` on top
    pub async fn load(
        &self,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<RegistrySection> {
        let global = self.load_global_config().await?.map(|(config, _)| config);
        let project = self.load_project_config().await?.map(|(config, _)| config);

        ConfigLayering::new()
            .with_global(global)
            .with_project(project)
            .with_env(env_overrides)
            .with_cli(cli_overrides)
            .resolve()
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(self, global_config: Option<NpmcToml>) -> Self {
        Self {
            global_config,
            ..self
        }
    }

    pub fn with_project(self, project_config: Option<NpmcToml>) -> Self {
        Self {
            project_config,
            ..self
        }
    }

    pub fn with_env(self, env_overrides: HashMap<String, String>) -> Self {
        Self {
            env_overrides,
            ..self
        }
    }

    pub fn with_cli(self, cli_overrides: HashMap<String, String>) -> Self {
        Self {
            cli_overrides,
            ..self
        }
    }

    /// Merge all layers held by this value
    pub fn resolve(self) -> ConfigResult<RegistrySection> {
        Self::merge_configs(
            self.global_config,
            self.project_config,
            self.env_overrides,
            self.cli_overrides,
        )
    }

    /// Merge multiple configuration layers.
    ///
    /// Later layers win: global, project, environment, command line. A layer
    /// that names a registry (by URL or mirror) replaces both settings of the
    /// layers below it. The standard proxy variables are only consulted when
    /// no layer sets a proxy.
    pub fn merge_configs(
        global_config: Option<NpmcToml>,
        project_config: Option<NpmcToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<RegistrySection> {
        let mut merged = RegistrySection::default();

        for config in [global_config, project_config].into_iter().flatten() {
            Self::apply_section(&mut merged, config.registry);
        }

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut merged, &env_overrides)?;

        // Apply CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut merged, &cli_overrides)?;

        if merged.proxy.is_none() {
            merged.proxy = ambient_proxy(&merged, &env_overrides);
        }

        Ok(merged)
    }

    fn apply_section(merged: &mut RegistrySection, layer: RegistrySection) {
        if layer.url.is_some() || layer.mirror.is_some() {
            merged.url = layer.url;
            merged.mirror = layer.mirror;
        }
        if layer.downloads_url.is_some() {
            merged.downloads_url = layer.downloads_url;
        }
        if layer.proxy.is_some() {
            merged.proxy = layer.proxy;
        }
        if layer.timeout_secs.is_some() {
            merged.timeout_secs = layer.timeout_secs;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        config: &mut RegistrySection,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        let get = |key: &str| overrides.get(key).map(String::as_str);

        let layer = RegistrySection {
            url: get("NPMC_REGISTRY").map(str::to_string),
            mirror: get("NPMC_MIRROR").map(str::to_string),
            downloads_url: get("NPMC_DOWNLOADS_URL").map(str::to_string),
            proxy: get("NPMC_PROXY").map(str::to_string),
            timeout_secs: get("NPMC_TIMEOUT_SECS")
                .map(|value| parse_timeout("NPMC_TIMEOUT_SECS", value))
                .transpose()?,
        };
        Self::apply_section(config, layer);

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(
        config: &mut RegistrySection,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        let mut layer = RegistrySection::default();

        for (key, value) in overrides {
            match key.as_str() {
                "registry" => layer.url = Some(value.clone()),
                "mirror" => layer.mirror = Some(value.clone()),
                "downloads-url" => layer.downloads_url = Some(value.clone()),
                "proxy" => layer.proxy = Some(value.clone()),
                "timeout-secs" => layer.timeout_secs = Some(parse_timeout("--timeout", value)?),
                _ => {
                    // Unknown CLI override, ignore
                }
            }
        }
        Self::apply_section(config, layer);

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| {
                key.starts_with("NPMC_")
                    || PROXY_ENV_FALLBACKS.contains(&key.as_str())
                    || NO_PROXY_ENV.contains(&key.as_str())
            })
            .collect()
    }
}

/// Proxy from the standard `HTTPS_PROXY`/`HTTP_PROXY` variables.
///
/// These variables are shared with every other tool on the machine, so a
/// value npmc cannot use is skipped with a warning instead of failing, and
/// `NO_PROXY` is honored for the registry host.
fn ambient_proxy(merged: &RegistrySection, env: &HashMap<String, String>) -> Option<String> {
    let (name, value) = PROXY_ENV_FALLBACKS.into_iter().find_map(|name| {
        env.get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| (name, value))
    })?;

    let no_proxy = NO_PROXY_ENV
        .into_iter()
        .find_map(|name| env.get(name))
        .map(String::as_str)
        .unwrap_or_default();
    let registry_host = merged
        .to_client_options()
        .ok()
        .and_then(|options| Url::parse(options.registry_url()).ok())
        .and_then(|url| url.host_str().map(str::to_string));
    if let Some(host) = registry_host {
        if no_proxy_matches(no_proxy, &host) {
            debug!(host = %host, "registry host listed in NO_PROXY, ignoring {}", name);
            return None;
        }
    }

    match parse_proxy_url(value) {
        Ok(_) => Some(value.to_string()),
        Err(e) => {
            warn!("Ignoring {}: {}", name, e);
            None
        }
    }
}

/// Whether `host` is covered by a comma separated `NO_PROXY` list.
///
/// `*` matches everything; other entries match the host itself and its
/// subdomains, with or without a leading dot.
fn no_proxy_matches(no_proxy: &str, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    no_proxy
        .split(',')
        .map(|entry| entry.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .any(|entry| {
            entry == "*"
                || host == entry
                || host
                    .strip_suffix(entry.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
}

fn parse_timeout(field: &str, value: &str) -> ConfigResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(NpmcError::ConfigValidation {
            field: field.to_string(),
            reason: format!("Expected a positive number of seconds, got '{}'", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_config(url: Option<&str>, mirror: Option<&str>) -> NpmcToml {
        NpmcToml {
            registry: RegistrySection {
                url: url.map(str::to_string),
                mirror: mirror.map(str::to_string),
                ..Default::default()
            },
        }
    }

    fn temp_utf8_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, temp_path)
    }

    #[tokio::test]
    async fn test_resolve_config_path_walks_up() {
        let (_guard, temp_path) = temp_utf8_dir();

        let config_path = temp_path.join("npmc.toml");
        tokio::fs::write(&config_path, "[registry]\nmirror = \"yarn\"\n")
            .await
            .unwrap();
        let nested = temp_path.join("packages").join("app");
        tokio::fs::create_dir_all(&nested).await.unwrap();

        let loader = ConfigLoader::new(nested).with_home_dir(None);
        let resolved = loader.resolve_config_path(CONFIG_FILE_NAME).unwrap();
        assert_eq!(resolved, config_path);

        let (config, source) = loader.load_project_config().await.unwrap().unwrap();
        assert_eq!(config.registry.mirror.as_deref(), Some("yarn"));
        assert_eq!(source, ConfigSource::Project(config_path));
    }

    #[tokio::test]
    async fn test_missing_global_config_is_none() {
        let (_guard, temp_path) = temp_utf8_dir();

        let loader = ConfigLoader::new(temp_path.clone()).with_home_dir(Some(temp_path.clone()));
        assert!(loader.load_global_config().await.unwrap().is_none());
        assert!(ConfigLoader::new(temp_path)
            .with_home_dir(None)
            .global_config_path()
            .is_none());
    }

    #[tokio::test]
    async fn test_load_global_config() {
        let (_guard, home) = temp_utf8_dir();
        tokio::fs::create_dir_all(home.join(".npmc")).await.unwrap();
        tokio::fs::write(
            home.join(".npmc").join("config.toml"),
            "[registry]\nproxy = \"http://proxy.internal:3128\"\n",
        )
        .await
        .unwrap();

        let loader = ConfigLoader::new(home.clone()).with_home_dir(Some(home.clone()));
        let (config, source) = loader.load_global_config().await.unwrap().unwrap();
        assert_eq!(config.registry.proxy.as_deref(), Some("http://proxy.internal:3128"));
        assert_eq!(source, ConfigSource::Global(home.join(".npmc").join("config.toml")));
    }

    #[tokio::test]
    async fn test_broken_project_file_reports_path() {
        let (_guard, temp_path) = temp_utf8_dir();
        tokio::fs::write(temp_path.join("npmc.toml"), "[registry\n")
            .await
            .unwrap();

        let loader = ConfigLoader::new(temp_path.clone()).with_home_dir(None);
        match loader.load(HashMap::new(), HashMap::new()).await {
            Err(NpmcError::TomlParse { path, line, .. }) => {
                assert_eq!(path, temp_path.join("npmc.toml").as_str());
                assert!(line >= 1);
            }
            other => panic!("Expected TomlParse, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_configs() {
        let mut global_config = registry_config(Some("https://global.example.com"), None);
        global_config.registry.timeout_secs = Some(60);
        global_config.registry.proxy = Some("http://global-proxy:8080".to_string());

        let project_config = registry_config(None, Some("taobao"));

        let env_overrides = HashMap::from([
            ("NPMC_TIMEOUT_SECS".to_string(), "15".to_string()),
            ("NPMC_PROXY".to_string(), "http://env-proxy:8080".to_string()),
        ]);

        let cli_overrides = HashMap::from([(
            "downloads-url".to_string(),
            "https://downloads.example.com".to_string(),
        )]);

        let merged =
            ConfigLayering::merge_configs(Some(global_config), Some(project_config), env_overrides, cli_overrides)
                .unwrap();

        // Project mirror replaces the global URL
        assert_eq!(merged.url, None);
        assert_eq!(merged.mirror.as_deref(), Some("taobao"));

        // Environment overrides both files
        assert_eq!(merged.timeout_secs, Some(15));
        assert_eq!(merged.proxy.as_deref(), Some("http://env-proxy:8080"));

        // CLI override applied on top
        assert_eq!(merged.downloads_url.as_deref(), Some("https://downloads.example.com"));
    }

    #[test]
    fn test_npmc_proxy_beats_standard_variables() {
        let env_overrides = HashMap::from([
            ("HTTP_PROXY".to_string(), "http://standard:8080".to_string()),
            ("NPMC_PROXY".to_string(), "socks5://npmc:1080".to_string()),
        ]);
        let merged = ConfigLayering::new().with_env(env_overrides).resolve().unwrap();
        assert_eq!(merged.proxy.as_deref(), Some("socks5://npmc:1080"));
    }

    #[test]
    fn test_standard_proxy_is_lowest_priority() {
        let env_overrides = HashMap::from([(
            "HTTPS_PROXY".to_string(),
            "http://standard:8080".to_string(),
        )]);

        let mut global_config = registry_config(None, None);
        global_config.registry.proxy = Some("http://configured:3128".to_string());
        let merged = ConfigLayering::new()
            .with_global(Some(global_config))
            .with_env(env_overrides.clone())
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy.as_deref(), Some("http://configured:3128"));

        let merged = ConfigLayering::new().with_env(env_overrides).resolve().unwrap();
        assert_eq!(merged.proxy.as_deref(), Some("http://standard:8080"));
    }

    #[test]
    fn test_unusable_standard_proxy_is_skipped() {
        let merged = ConfigLayering::new()
            .with_env(HashMap::from([(
                "HTTPS_PROXY".to_string(),
                "proxy.corp:3128".to_string(),
            )]))
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy, None);
        assert!(merged.to_client_options().is_ok());

        // An explicit npmc proxy is still validated when the client is built
        let merged = ConfigLayering::new()
            .with_env(HashMap::from([(
                "NPMC_PROXY".to_string(),
                "proxy.corp:3128".to_string(),
            )]))
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy.as_deref(), Some("proxy.corp:3128"));
    }

    #[test]
    fn test_no_proxy_covers_registry_host() {
        let env = |no_proxy: &str| {
            HashMap::from([
                ("HTTP_PROXY".to_string(), "http://standard:8080".to_string()),
                ("NO_PROXY".to_string(), no_proxy.to_string()),
            ])
        };

        let merged = ConfigLayering::new()
            .with_env(env("localhost, .npmjs.org"))
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy, None);

        let merged = ConfigLayering::new()
            .with_cli(HashMap::from([(
                "registry".to_string(),
                "http://localhost:4873".to_string(),
            )]))
            .with_env(env("*"))
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy, None);

        let merged = ConfigLayering::new()
            .with_env(env("internal.example.com"))
            .resolve()
            .unwrap();
        assert_eq!(merged.proxy.as_deref(), Some("http://standard:8080"));
    }

    #[test]
    fn test_no_proxy_matches() {
        assert!(no_proxy_matches("npmjs.org", "registry.npmjs.org"));
        assert!(no_proxy_matches(".npmjs.org", "registry.npmjs.org"));
        assert!(no_proxy_matches("REGISTRY.npmjs.org", "registry.npmjs.org"));
        assert!(no_proxy_matches("a.com,*", "registry.npmjs.org"));
        assert!(!no_proxy_matches("npmjs.org", "notnpmjs.org"));
        assert!(!no_proxy_matches("", "registry.npmjs.org"));
    }

    #[test]
    fn test_cli_registry_beats_project_mirror() {
        let merged = ConfigLayering::new()
            .with_project(Some(registry_config(None, Some("cnpm"))))
            .with_cli(HashMap::from([(
                "registry".to_string(),
                "http://localhost:4873".to_string(),
            )]))
            .resolve()
            .unwrap();

        let options = merged.to_client_options().unwrap();
        assert_eq!(options.registry_url(), "http://localhost:4873");
    }

    #[test]
    fn test_invalid_overrides() {
        let result = ConfigLayering::new()
            .with_env(HashMap::from([("NPMC_TIMEOUT_SECS".to_string(), "soon".to_string())]))
            .resolve();
        match result {
            Err(NpmcError::ConfigValidation { field, .. }) => assert_eq!(field, "NPMC_TIMEOUT_SECS"),
            other => panic!("Expected ConfigValidation, got {:?}", other),
        }

        let merged = ConfigLayering::new()
            .with_env(HashMap::from([("NPMC_MIRROR".to_string(), "nowhere".to_string())]))
            .resolve()
            .unwrap();
        assert!(matches!(
            merged.to_client_options(),
            Err(NpmcError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_collect_env_overrides() {
        // Set some test environment variables
        std::env::set_var("NPMC_MIRROR", "yarn");
        std::env::set_var("NOT_NPMC_VAR", "ignored");

        let overrides = ConfigLayering::collect_env_overrides();

        assert_eq!(overrides.get("NPMC_MIRROR").map(String::as_str), Some("yarn"));
        assert!(!overrides.contains_key("NOT_NPMC_VAR"));

        // Clean up
        std::env::remove_var("NPMC_MIRROR");
        std::env::remove_var("NOT_NPMC_VAR");
    }
}
