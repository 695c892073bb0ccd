//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands:
//! colored status lines, aligned key/value fields, and the `--json` mode.

pub mod colors;
pub mod errors;

use serde::Serialize;

use npmc_core::error::{NpmcError, NpmcResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self::with_colors(colors::ColorSupport::detect())
    }

    /// Create an output handler with fixed color support
    pub fn with_colors(colors: colors::ColorSupport) -> Self {
        Self { colors }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a heading line
    pub fn heading(&self, message: &str) {
        println!("{}", self.colors.bold(message));
    }

    /// Print labelled fields with their values aligned
    pub fn fields(&self, fields: &[(&str, String)]) {
        for line in self.format_fields(fields) {
            println!("{}", line);
        }
    }

    /// Render labelled fields, padding labels to the widest one
    pub fn format_fields(&self, fields: &[(&str, String)]) -> Vec<String> {
        let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        fields
            .iter()
            .map(|(label, value)| {
                let padded = format!("{:<width$}", label, width = width);
                format!("{}  {}", self.colors.dim(&padded), value)
            })
            .collect()
    }

    /// Print `value` as pretty JSON on stdout
    pub fn json<T: Serialize>(&self, value: &T) -> NpmcResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(NpmcError::decode)?;
        println!("{}", text);
        Ok(())
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
