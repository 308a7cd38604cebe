//! Version selection for Pea fetchers
//!
//! This crate picks a single manifest out of a packument for a wanted
//! dist-tag, exact version or semver range.

pub mod pick;
pub mod semver;

// Re-export main types
pub use pick::{pick_manifest, PickOptions};
pub use semver::VersionSelector;

use pea_core::error::PeaError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, PeaError>;
