//! pea.toml `[fetch]` section parsing and validation

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use pea_core::types::VersionReq;
use pea_core::error::PeaError;
use crate::{ConfigResult, FetchOptions};

/// The parts of a pea.toml this workspace reads. Other sections are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeaToml {
    /// Fetcher settings
    #[serde(default)]
    pub fetch: FetchSection,
}

/// `[fetch]` section; every field is optional so layers can be merged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FetchSection {
    /// Storage daemon endpoint (`/ip4/127.0.0.1/tcp/5001` or `http://127.0.0.1:5001`)
    #[serde(alias = "ipfs-url", skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Tag preferred when it satisfies a wanted range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tag: Option<String>,

    /// RFC 3339 cutoff; versions published later are ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enjoy_by: Option<String>,

    /// Allow deprecated versions to win selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deprecated: Option<bool>,
}

impl FetchSection {
    /// Overlay the fields set in this section onto `opts`
    pub fn apply_to(&self, opts: &mut FetchOptions) -> ConfigResult<()> {
        if let Some(url) = &self.endpoint_url {
            opts.endpoint_url = Some(url.clone());
        }
        if let Some(tag) = &self.default_tag {
            validate_tag(tag)?;
            opts.default_tag = tag.clone();
        }
        if let Some(enjoy_by) = &self.enjoy_by {
            opts.enjoy_by = Some(parse_enjoy_by(enjoy_by)?);
        }
        if let Some(include) = self.include_deprecated {
            opts.include_deprecated = include;
        }
        Ok(())
    }

    /// Fields of `other` replace the ones set here
    pub fn merge(&mut self, other: &FetchSection) {
        if other.endpoint_url.is_some() {
            self.endpoint_url = other.endpoint_url.clone();
        }
        if other.default_tag.is_some() {
            self.default_tag = other.default_tag.clone();
        }
        if other.enjoy_by.is_some() {
            self.enjoy_by = other.enjoy_by.clone();
        }
        if other.include_deprecated.is_some() {
            self.include_deprecated = other.include_deprecated;
        }
    }
}

/// Parse TOML string to PeaToml configuration
pub fn parse_pea_toml(content: &str) -> ConfigResult<PeaToml> {
    // First try with toml_edit for better error reporting
    content.parse::<toml_edit::DocumentMut>().map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| line_column(content, span.start))
            .unwrap_or((0, 0));
        PeaError::TomlParse {
            file: "pea.toml".to_string(),
            message: format!("{} at line {}, column {}", e.message().trim(), line, column),
        }
    })?;

    // Then parse with serde for type safety
    let config: PeaToml = toml::from_str(content).map_err(|e| PeaError::TomlParse {
        file: "pea.toml".to_string(),
        message: e.message().to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate the `[fetch]` section
pub fn validate_config(config: &PeaToml) -> ConfigResult<()> {
    let fetch = &config.fetch;

    if let Some(url) = &fetch.endpoint_url {
        if url.trim().is_empty() {
            return Err(PeaError::ConfigValidation {
                field: "endpoint-url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
    }

    if let Some(tag) = &fetch.default_tag {
        validate_tag(tag)?;
    }

    if let Some(enjoy_by) = &fetch.enjoy_by {
        parse_enjoy_by(enjoy_by)?;
    }

    Ok(())
}

/// Load and parse pea.toml from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<PeaToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PeaError::io(format!("Failed to read {}", path), e))?;

    parse_pea_toml(&content).map_err(|e| match e {
        PeaError::TomlParse { message, .. } => PeaError::TomlParse {
            file: path.to_string(),
            message,
        },
        PeaError::ConfigValidation { field, reason } => PeaError::ConfigValidation {
            field,
            reason: format!("{} (in {})", reason, path),
        },
        other => other,
    })
}

/// Tags must be non-empty and must not be parseable as a version range
pub fn validate_tag(tag: &str) -> ConfigResult<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(PeaError::ConfigValidation {
            field: "default-tag".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if VersionReq::parse(tag).is_ok() {
        return Err(PeaError::ConfigValidation {
            field: "default-tag".to_string(),
            reason: format!("'{}' is a version range, not a tag name", tag),
        });
    }
    Ok(())
}

/// Parse an RFC 3339 `enjoy-by` cutoff
pub fn parse_enjoy_by(value: &str) -> ConfigResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| PeaError::ConfigValidation {
            field: "enjoy-by".to_string(),
            reason: format!("'{}' is not an RFC 3339 timestamp: {}", value, e),
        })
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
