//! Semantic version selection
//!
//! Picks the best matching version out of the versions a packument
//! publishes, with optional preference predicates (non-deprecated,
//! published before a cutoff, ...).

use std::collections::BTreeSet;
use std::str::FromStr;

use pea_core::types::{Packument, Version, VersionReq};

/// Version selector for finding best matching versions
#[derive(Debug, Clone)]
pub struct VersionSelector {
    /// Available versions, ascending
    available_versions: BTreeSet<Version>,
}

impl VersionSelector {
    /// Create new version selector with available versions
    pub fn new(versions: Vec<Version>) -> Self {
        let available_versions = versions.into_iter().collect();
        Self { available_versions }
    }

    /// Selector over every valid version key of a packument
    pub fn from_packument(packument: &Packument) -> Self {
        let available_versions = packument
            .versions
            .keys()
            .filter_map(|key| Version::from_str(key).ok())
            .collect();
        Self { available_versions }
    }

    /// Select highest version matching the requirement
    pub fn select_best(&self, req: &VersionReq) -> Option<Version> {
        self.available_versions
            .iter()
            .rev() // Start with highest versions
            .find(|version| req.matches(version))
            .cloned()
    }

    /// Select the highest match accepted by `prefer`, falling back to the
    /// highest match overall
    pub fn select_preferred<F>(&self, req: &VersionReq, prefer: F) -> Option<Version>
    where
        F: Fn(&Version) -> bool,
    {
        self.available_versions
            .iter()
            .rev()
            .filter(|version| req.matches(version))
            .find(|version| prefer(version))
            .cloned()
            .or_else(|| self.select_best(req))
    }

    /// Find all versions matching the requirement, highest first
    pub fn find_matching(&self, req: &VersionReq) -> Vec<Version> {
        self.available_versions
            .iter()
            .rev()
            .filter(|version| req.matches(version))
            .cloned()
            .collect()
    }

    /// Keep only versions accepted by `keep`
    pub fn retain<F>(&mut self, keep: F)
    where
        F: Fn(&Version) -> bool,
    {
        self.available_versions.retain(|version| keep(version));
    }

    /// Get the highest available version
    pub fn highest_version(&self) -> Option<&Version> {
        self.available_versions.iter().next_back()
    }

    /// Check if any version satisfies the requirement
    pub fn has_matching(&self, req: &VersionReq) -> bool {
        self.available_versions.iter().any(|version| req.matches(version))
    }

    pub fn is_empty(&self) -> bool {
        self.available_versions.is_empty()
    }
}
