//! Terminal output formatting and utilities.
//!
//! Status messages go to stderr so that fetched documents and tarballs
//! written to stdout stay clean.

pub mod colors;
pub mod errors;

use std::io::Write;

use pea_core::error::{PeaError, PeaResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a fetched document to stdout
    pub fn data(&self, text: &str) -> PeaResult<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)
            .and_then(|_| stdout.flush())
            .map_err(|e| PeaError::io("Failed to write to stdout".to_string(), e))
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
