//! IPFS daemon RPC response types

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v0/name/resolve`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NameResolveResponse {
    /// Resolved path, usually `/ipfs/<cid>`
    pub path: String,
}

impl NameResolveResponse {
    /// Resolved path without its `/ipfs/` prefix
    pub fn content_id(&self) -> &str {
        let path = self.path.trim();
        path.strip_prefix("/ipfs/").unwrap_or(path)
    }
}

/// Error body the daemon sends with non-success statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DaemonError {
    /// Human readable failure
    pub message: String,
    /// Numeric error code
    #[serde(default)]
    pub code: Option<i64>,
    /// Error kind, usually "error"
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}
