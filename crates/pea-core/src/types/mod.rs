//! Core data types for Pea package fetching.
//!
//! This module provides the fundamental types used throughout the workspace:
//! - Version types for semantic versioning and npm-style ranges
//! - Packument and manifest documents

pub mod packument;
pub mod version;

// Re-export all public types
pub use packument::{Dist, Manifest, Packument};
pub use version::{Comparator, Op, PartialVersion, Version, VersionError, VersionReq};
