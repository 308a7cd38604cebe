//! Packument and manifest types.
//!
//! A packument is the full metadata document for a package: every published
//! version's manifest plus the dist-tag and publish-time tables. Fields the
//! fetchers do not interpret are preserved verbatim in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Full package document
///
/// Any valid JSON object decodes; fields of an unexpected shape fall back to
/// their defaults instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Packument {
    /// Package name
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Distribution tag name to version
    #[serde(rename = "dist-tags", default, deserialize_with = "lenient::entries")]
    pub dist_tags: BTreeMap<String, String>,
    /// Version string to manifest
    #[serde(default, deserialize_with = "lenient::entries")]
    pub versions: BTreeMap<String, Manifest>,
    /// Version string (plus `created`/`modified`/`unpublished`) to publish time
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Map::is_empty")]
    pub time: Map<String, Value>,
    /// Remaining document fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single version's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub version: String,
    /// Deprecation message, when the version has been deprecated
    #[serde(default, deserialize_with = "lenient::deprecation", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Distribution descriptor; `null` or a malformed value reads as empty
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub dist: Dist,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Distribution descriptor for a manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dist {
    /// Content id of the tarball on the storage network
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Registry tarball URL
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub tarball: Option<String>,
    /// SHA-1 checksum (legacy)
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
    /// Subresource integrity hash
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    /// A value that does not fit `T` reads as `T::default()`
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).unwrap_or_default())
    }

    /// Object entries whose values fit `T`; anything else is dropped
    pub fn entries<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let entries = match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| T::deserialize(value).ok().map(|value| (key, value)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(entries)
    }

    /// `deprecated` is a message, or `true` without one
    pub fn deprecation<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(message) => Some(message),
            Value::Bool(true) => Some("deprecated".to_string()),
            _ => None,
        })
    }
}

impl Packument {
    /// Manifest for an exact version string
    pub fn version(&self, version: &str) -> Option<&Manifest> {
        self.versions.get(version)
    }

    /// Version a dist-tag points to
    pub fn tag(&self, tag: &str) -> Option<&str> {
        self.dist_tags.get(tag).map(String::as_str)
    }

    /// The `latest` dist-tag, if declared
    pub fn latest(&self) -> Option<&str> {
        self.tag("latest")
    }

    /// Publish time recorded for a version
    pub fn published(&self, version: &str) -> Option<&str> {
        self.time.get(version).and_then(Value::as_str)
    }
}

impl Manifest {
    /// Whether this version carries a deprecation message
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_deref().is_some_and(|msg| !msg.is_empty())
    }

    /// Non-empty tarball content id
    pub fn content_id(&self) -> Option<&str> {
        self.dist
            .cid
            .as_deref()
            .map(str::trim)
            .filter(|cid| !cid.is_empty())
    }
}
