//! # pea-core
//!
//! Core types shared across the Pea fetcher crates.
//!
//! This crate provides:
//! - Version and VersionReq types with npm-style range parsing
//! - Packument, Manifest and Dist documents
//! - PeaError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, Packument, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PeaError, PeaResult};
pub use types::{Dist, Manifest, Packument, Version, VersionReq};
