//! Error message formatting with actionable suggestions.
//!
//! Renders an [`NpmcError`] with its cause chain, a `help` line when one is
//! known, and the file location of configuration parse errors.

use std::error::Error;

use npmc_core::error::NpmcError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &NpmcError) -> String {
        let mut lines = vec![format!("{}: {}", self.colors.red("error"), error)];

        if let NpmcError::TomlParse {
            path, line, column, ..
        } = error
        {
            lines.push(self.format_location(path, *line, *column));
        }

        // Source chain
        let mut source = error.source();
        while let Some(err) = source {
            lines.push(format!("{}: {}", self.colors.dim("caused by"), err));
            source = err.source();
        }

        if let Some(suggestion) = error.suggestion() {
            lines.push(format!("{}: {}", self.colors.dim("help"), suggestion));
        }

        lines.join("\n")
    }

    /// Format file location context
    fn format_location(&self, file: &str, line: usize, column: usize) -> String {
        format!("  {} {}:{}:{}", self.colors.dim("-->"), file, line, column)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
