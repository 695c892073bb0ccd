//! # npmc
//!
//! Command-line client for npm registries.
//!
//! This is the main entry point for the npmc CLI tool. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use npmc_core::error::{NpmcError, NpmcResult};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Query npm-compatible registries
#[derive(Parser, Debug)]
#[command(name = "npmc", version, about = "Query npm-compatible registries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry base URL (overrides any mirror)
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    /// Use a well-known mirror (see `npmc mirrors`)
    #[arg(long, global = true, value_name = "NAME")]
    pub mirror: Option<String>,

    /// Proxy every request through URL
    #[arg(long, global = true, value_name = "URL")]
    pub proxy: Option<String>,

    /// Print the decoded registry record as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show registry status
    Status,
    /// Show package summary
    Info { package: String },
    /// Show one version of a package
    Show {
        package: String,
        /// Exact version or dist-tag
        #[arg(value_name = "VERSION", default_value = "latest")]
        version_or_tag: String,
    },
    /// Search packages
    Search {
        query: String,
        /// Maximum number of results (0 for the registry default)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i32,
    },
    /// Show download counts
    Downloads {
        package: String,
        /// last-day, last-week, last-month or YYYY-MM-DD:YYYY-MM-DD
        #[arg(short, long, default_value = "last-week")]
        period: String,
        /// Break the count down per day
        #[arg(long)]
        daily: bool,
    },
    /// List well-known registry mirrors
    Mirrors,
}

impl Cli {
    /// Flag values that override configuration files and environment
    pub fn config_overrides(&self) -> HashMap<String, String> {
        [
            ("registry", &self.registry),
            ("mirror", &self.mirror),
            ("proxy", &self.proxy),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|value| (key.to_string(), value)))
        .collect()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting npmc v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> NpmcResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| NpmcError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.config_overrides(), cli.json).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,npmc={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("npmc encountered an unexpected error: {}", panic_info);
        eprintln!("npmc crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/npmc-dev/npmc/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
