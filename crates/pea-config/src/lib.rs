//! Configuration for the Pea fetchers
//!
//! This crate reads the `[fetch]` section of pea.toml files and layers it
//! with environment variables and command-line flags into `FetchOptions`.

pub mod merge;
pub mod options;
pub mod toml;

// Re-export main types
pub use crate::merge::{ConfigLayering, ConfigLoader, ConfigSource};
pub use crate::options::{FetchOptions, DEFAULT_TAG};
pub use crate::toml::{FetchSection, PeaToml};

use pea_core::error::PeaError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, PeaError>;
