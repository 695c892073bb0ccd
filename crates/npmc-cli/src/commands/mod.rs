//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use npmc_config::{ConfigLayering, ConfigLoader};
use npmc_core::error::{NpmcError, NpmcResult};
use npmc_registry::RegistryClient;
use tracing::debug;

pub mod downloads;
pub mod info;
pub mod mirrors;
pub mod search;
pub mod show;
pub mod status;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub client: RegistryClient,
    pub output: OutputHandler,
    /// Print records as JSON instead of text
    pub json: bool,
}

impl CommandContext {
    /// Load configuration for the current directory and build the client
    pub async fn new(cli_overrides: HashMap<String, String>, json: bool) -> NpmcResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| NpmcError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| NpmcError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Current directory is not valid UTF-8: {}", e),
        })?;

        let registry = ConfigLoader::new(cwd)
            .load(ConfigLayering::collect_env_overrides(), cli_overrides)
            .await?;
        let options = registry.to_client_options()?;
        debug!(registry = options.registry_url(), proxy = ?options.proxy(), "client configured");

        Ok(Self {
            client: RegistryClient::with_options(options)?,
            output: OutputHandler::new(),
            json,
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> NpmcResult<()> {
    debug!(?command, "dispatching");

    match command {
        Commands::Status => status::execute(ctx).await,
        Commands::Info { package } => info::execute(&package, ctx).await,
        Commands::Show {
            package,
            version_or_tag,
        } => show::execute(&package, &version_or_tag, ctx).await,
        Commands::Search { query, limit } => search::execute(&query, limit, ctx).await,
        Commands::Downloads {
            package,
            period,
            daily,
        } => downloads::execute(&package, &period, daily, ctx).await,
        Commands::Mirrors => mirrors::execute(ctx).await,
    }
}

/// Thousands separators for counters
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
