//! Manifest selection from a packument
//!
//! Turns a wanted spec (dist-tag, exact version or range) into a single
//! manifest, the way npm picks one: dist-tags first, then exact versions,
//! then the default tag when it satisfies the range, then the highest
//! non-deprecated match.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pea_core::error::PeaError;
use pea_core::types::{Manifest, Packument, Version, VersionReq};
use tracing::debug;

use crate::semver::VersionSelector;
use crate::ResolverResult;

/// Options steering manifest selection
#[derive(Debug, Clone, PartialEq)]
pub struct PickOptions {
    /// Tag preferred when it satisfies the wanted range
    pub default_tag: String,
    /// Ignore versions published after this instant
    pub enjoy_by: Option<DateTime<Utc>>,
    /// Treat deprecated versions like any other
    pub include_deprecated: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            default_tag: "latest".to_string(),
            enjoy_by: None,
            include_deprecated: false,
        }
    }
}

/// Select the manifest matching `wanted` from a packument
pub fn pick_manifest(
    packument: &Packument,
    wanted: &str,
    opts: &PickOptions,
) -> ResolverResult<Manifest> {
    let wanted = wanted.trim();
    let name = packument.name.as_str();

    if packument.versions.is_empty() {
        return Err(PeaError::NoVersions {
            name: name.to_string(),
        });
    }

    // Version -> original key in `versions` (keys may carry a `v` prefix)
    let keys: HashMap<Version, &str> = packument
        .versions
        .keys()
        .filter_map(|key| Version::from_str(key).ok().map(|v| (v, key.as_str())))
        .collect();

    let published_in_time = |version: &Version| match opts.enjoy_by {
        None => true,
        Some(cutoff) => keys
            .get(version)
            .and_then(|key| packument.published(key))
            .and_then(|time| DateTime::parse_from_rfc3339(time).ok())
            .is_some_and(|time| time.with_timezone(&Utc) <= cutoff),
    };

    let mut range = wanted.to_string();

    // Dist-tag
    if let Some(tagged) = packument.tag(wanted) {
        match Version::from_str(tagged) {
            Ok(version) if keys.contains_key(&version) && published_in_time(&version) => {
                debug!("{}: dist-tag {} -> {}", name, wanted, tagged);
                return Ok(manifest_for(packument, keys[&version]));
            },
            // Tagged version is too new; settle for the newest one before it
            Ok(version) if keys.contains_key(&version) => range = format!("<={}", version),
            _ => {
                return Err(no_match(name, wanted));
            },
        }
    }

    // Exact version
    if let Ok(version) = Version::from_str(wanted) {
        return match keys.get(&version) {
            Some(key) if published_in_time(&version) => Ok(manifest_for(packument, key)),
            _ => Err(no_match(name, wanted)),
        };
    }

    let req = VersionReq::parse(&range).map_err(|_| no_match(name, wanted))?;

    let mut selector = VersionSelector::from_packument(packument);
    selector.retain(|version| published_in_time(version));

    let is_deprecated = |version: &Version| {
        keys.get(version)
            .and_then(|key| packument.version(key))
            .is_some_and(Manifest::is_deprecated)
    };

    // Default tag wins when it satisfies the range
    let candidates = selector.find_matching(&req);
    let default_version = packument
        .tag(&opts.default_tag)
        .and_then(|tagged| Version::from_str(tagged).ok())
        .filter(|version| keys.contains_key(version) && candidates.contains(version))
        .filter(|version| opts.include_deprecated || !is_deprecated(version));

    let selected = match default_version {
        Some(version) => Some(version),
        None if opts.include_deprecated => selector.select_best(&req),
        None => selector.select_preferred(&req, |version| !is_deprecated(version)),
    };

    match selected.as_ref().and_then(|version| keys.get(version)) {
        Some(key) => {
            debug!("{}: {} -> {}", name, wanted, key);
            Ok(manifest_for(packument, key))
        },
        None => Err(no_match(name, wanted)),
    }
}

fn manifest_for(packument: &Packument, key: &str) -> Manifest {
    let mut manifest = packument.versions[key].clone();
    if manifest.name.is_empty() {
        manifest.name = packument.name.clone();
    }
    if manifest.version.is_empty() {
        manifest.version = key.to_string();
    }
    manifest
}

fn no_match(name: &str, wanted: &str) -> PeaError {
    PeaError::NoMatchingVersion {
        name: name.to_string(),
        wanted: wanted.to_string(),
    }
}
