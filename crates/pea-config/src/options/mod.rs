//! Options recognized by the fetchers

use chrono::{DateTime, Utc};

/// Tag preferred when no default tag is configured
pub const DEFAULT_TAG: &str = "latest";

/// Effective options for one fetch call
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Storage daemon endpoint, as a multiaddr or http(s) URL
    pub endpoint_url: Option<String>,
    /// Tag preferred when it satisfies a wanted range
    pub default_tag: String,
    /// Ignore versions published after this instant
    pub enjoy_by: Option<DateTime<Utc>>,
    /// Allow deprecated versions to win selection
    pub include_deprecated: bool,
}

impl FetchOptions {
    /// Options with only the daemon endpoint set
    pub fn with_endpoint(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Self::default()
        }
    }

    /// Configured endpoint, ignoring blank values
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            default_tag: DEFAULT_TAG.to_string(),
            enjoy_by: None,
            include_deprecated: false,
        }
    }
}
