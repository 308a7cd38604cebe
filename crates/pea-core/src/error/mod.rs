//! Error types and result aliases for Pea operations.
//!
//! Provides a unified error type that covers every failure the fetchers can
//! report, with stable short codes and actionable suggestions.

use thiserror::Error;

/// Unified error type for all Pea operations
#[derive(Error, Debug)]
pub enum PeaError {
    // Config errors
    #[error("Failed to parse {file}: {message}")]
    TomlParse { file: String, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("{message}")]
    NoEndpointConfigured { message: String },

    // Request errors
    #[error("Invalid package spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("Invalid content id '{input}': {reason}")]
    InvalidContentId { input: String, reason: String },

    #[error("{operation} is not implemented for this fetcher")]
    NotImplemented { operation: String },

    // Network errors
    #[error("Failed to resolve name '{name}': {message}")]
    NameResolution { name: String, message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Packument errors
    #[error("Failed to parse packument: {message}")]
    PackumentParse { message: String },

    #[error("No matching version found for {name}@{wanted}")]
    NoMatchingVersion { name: String, wanted: String },

    #[error("No valid versions available for {name}")]
    NoVersions { name: String },

    #[error("No CID found for {name}@{version}")]
    MissingContentId { name: String, version: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Pea operations
pub type PeaResult<T> = Result<T, PeaError>;

impl PeaError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Short, stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PeaError::TomlParse { .. } => "ETOML",
            PeaError::ConfigValidation { .. } => "ECONFIG",
            PeaError::NoEndpointConfigured { .. } => "ENOIPFSURL",
            PeaError::InvalidSpec { .. } => "EINVALIDSPEC",
            PeaError::InvalidContentId { .. } => "EINVALIDCID",
            PeaError::NotImplemented { .. } => "ENOTIMPL",
            PeaError::NameResolution { .. } => "ENAMERESOLVE",
            PeaError::Network { .. } => "ENETWORK",
            PeaError::PackumentParse { .. } => "EJSONPARSE",
            PeaError::NoMatchingVersion { .. } => "ETARGET",
            PeaError::NoVersions { .. } => "ENOVERSIONS",
            PeaError::MissingContentId { .. } => "ENOCID",
            PeaError::Io { .. } => "EIO",
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PeaError::Network { .. } | PeaError::Io { .. } | PeaError::NameResolution { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PeaError::NoEndpointConfigured { .. } => {
                Some("Pass --endpoint-url or set endpoint-url in the [fetch] section of pea.toml")
            },
            PeaError::Network { .. } | PeaError::NameResolution { .. } => {
                Some("Check that the IPFS daemon is running and reachable, then try again")
            },
            PeaError::NoMatchingVersion { .. } => {
                Some("Check the requested version range or dist-tag against the published versions")
            },
            PeaError::MissingContentId { .. } => {
                Some("The packument entry has no dist.cid; republish the version with its tarball CID")
            },
            PeaError::InvalidContentId { .. } => {
                Some("Content ids look like Qm... (CIDv0) or bafy... (CIDv1)")
            },
            PeaError::InvalidSpec { .. } => {
                Some("Use ipfs://<cid> or ipns://<name>#<version-or-tag>")
            },
            _ => None,
        }
    }
}
