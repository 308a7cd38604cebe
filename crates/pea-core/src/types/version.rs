//! Semantic version types.
//!
//! Provides Version and VersionReq types that follow Semantic Versioning 2.0.0,
//! with npm-style range syntax for requirements.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version (major.minor.patch-prerelease+build)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Version requirement (^1.0.0, ~2.3.0, >=1.0.0 <2.0.0, 1.x || 2.x)
///
/// Each inner set is a conjunction of comparators; the requirement matches
/// when any set matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReq {
    pub sets: Vec<Vec<Comparator>>,
}

/// Individual version comparator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub version: PartialVersion,
}

/// Comparison operator for version requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Exact,     // =1.0.0
    Greater,   // >1.0.0
    GreaterEq, // >=1.0.0
    Less,      // <1.0.0
    LessEq,    // <=1.0.0
    Tilde,     // ~1.0.0
    Caret,     // ^1.0.0
    Wildcard,  // *
}

/// Partial version for comparisons (may have missing components)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Option<String>,
}

/// Version parsing and validation errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Invalid prerelease identifier: {prerelease}")]
    InvalidPrerelease { prerelease: String },

    #[error("Invalid build metadata: {build}")]
    InvalidBuild { build: String },
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Check if this version satisfies a version requirement
    pub fn satisfies(&self, req: &VersionReq) -> bool {
        req.matches(self)
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    fn same_release(&self, other: &Self) -> bool {
        (self.major, self.minor, self.patch) == (other.major, other.minor, other.patch)
    }

    /// Get the precedence for comparison (ignores build metadata)
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,    // prerelease < normal
                (None, Some(_)) => Ordering::Greater, // normal > prerelease
                (Some(a), Some(b)) => compare_prerelease(a, b),
            },
            other => other,
        }
    }
}

/// Compare dot-separated prerelease identifiers: numeric identifiers compare
/// numerically and sort below alphanumeric ones.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            },
        }
    }
}

fn valid_identifiers(s: &str) -> bool {
    s.split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let trimmed = input.strip_prefix('v').unwrap_or(input);

        // Split on '+' for build metadata
        let (version_part, build) = match trimmed.split_once('+') {
            Some((v, b)) => {
                if !valid_identifiers(b) {
                    return Err(VersionError::InvalidBuild { build: b.to_string() });
                }
                (v, Some(b.to_string()))
            },
            None => (trimmed, None),
        };

        // Split on '-' for prerelease
        let (core_part, prerelease) = match version_part.split_once('-') {
            Some((c, p)) => {
                if !valid_identifiers(p) {
                    return Err(VersionError::InvalidPrerelease {
                        prerelease: p.to_string(),
                    });
                }
                (c, Some(p.to_string()))
            },
            None => (version_part, None),
        };

        // Parse major.minor.patch
        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        Ok(Version {
            major: parse_number(parts[0])?,
            minor: parse_number(parts[1])?,
            patch: parse_number(parts[2])?,
            prerelease,
            build,
        })
    }
}

/// Largest version component npm accepts (`Number.MAX_SAFE_INTEGER`)
const MAX_COMPONENT: u64 = 9_007_199_254_740_991;

fn parse_number(component: &str) -> Result<u64, VersionError> {
    let invalid = || VersionError::InvalidNumber {
        component: component.to_string(),
    };

    if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    match component.parse::<u64>() {
        Ok(n) if n <= MAX_COMPONENT => Ok(n),
        _ => Err(invalid()),
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl VersionReq {
    /// Requirement matching every release version
    pub fn any() -> Self {
        VersionReq {
            sets: vec![vec![Comparator::wildcard()]],
        }
    }

    /// Parse a version requirement string
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::any());
        }

        let sets = input
            .split("||")
            .map(parse_comparator_set)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VersionReq { sets })
    }

    /// Check if a version matches this requirement
    pub fn matches(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set_matches(set, version))
    }
}

impl FromStr for VersionReq {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionReq::parse(s)
    }
}

impl fmt::Display for VersionReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                write!(f, " || ")?;
            }
            for (j, comp) in set.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", comp)?;
            }
        }
        Ok(())
    }
}

/// A prerelease version only satisfies a set that names a prerelease on the
/// same major.minor.patch tuple.
fn set_matches(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comp| comp.matches(version)) {
        return false;
    }

    if !version.is_prerelease() {
        return true;
    }

    set.iter().any(|comp| {
        comp.version.prerelease.is_some() && comp.version.to_version().same_release(version)
    })
}

fn parse_comparator_set(input: &str) -> Result<Vec<Comparator>, VersionError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(vec![Comparator::wildcard()]);
    }

    // Hyphen range: 1.2.3 - 2.3.4
    if let Some((low, high)) = input.split_once(" - ") {
        return Ok(vec![
            Comparator {
                op: Op::GreaterEq,
                version: PartialVersion::parse(low.trim())?,
            },
            Comparator {
                op: Op::LessEq,
                version: PartialVersion::parse(high.trim())?,
            },
        ]);
    }

    // Re-attach operators separated from their version by whitespace (">= 1.2.3")
    let mut tokens: Vec<String> = Vec::new();
    let mut pending = String::new();
    for token in input.split_whitespace() {
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending.push_str(token);
        } else {
            tokens.push(format!("{}{}", pending, token));
            pending.clear();
        }
    }
    if !pending.is_empty() {
        return Err(VersionError::InvalidFormat {
            input: input.to_string(),
        });
    }

    tokens.iter().map(|token| Comparator::parse(token)).collect()
}

impl Comparator {
    fn wildcard() -> Self {
        Comparator {
            op: Op::Wildcard,
            version: PartialVersion {
                major: 0,
                minor: None,
                patch: None,
                prerelease: None,
            },
        }
    }

    /// Parse a single comparator such as `^1.2.3`, `>=1.0`, or `1.x`
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();

        // Parse operator prefix
        let (op, version_str) = if let Some(stripped) = input.strip_prefix('^') {
            (Op::Caret, stripped)
        } else if let Some(stripped) = input.strip_prefix("~>") {
            (Op::Tilde, stripped)
        } else if let Some(stripped) = input.strip_prefix('~') {
            (Op::Tilde, stripped)
        } else if let Some(stripped) = input.strip_prefix(">=") {
            (Op::GreaterEq, stripped)
        } else if let Some(stripped) = input.strip_prefix("<=") {
            (Op::LessEq, stripped)
        } else if let Some(stripped) = input.strip_prefix('>') {
            (Op::Greater, stripped)
        } else if let Some(stripped) = input.strip_prefix('<') {
            (Op::Less, stripped)
        } else if let Some(stripped) = input.strip_prefix('=') {
            (Op::Exact, stripped)
        } else {
            (Op::Exact, input)
        };

        if is_wildcard(version_str.trim()) {
            return Ok(match op {
                // "<*" and ">*" parse but never match
                Op::Less | Op::Greater => Comparator {
                    op: Op::Less,
                    version: PartialVersion {
                        major: 0,
                        minor: Some(0),
                        patch: Some(0),
                        prerelease: Some("0".to_string()),
                    },
                },
                _ => Comparator::wildcard(),
            });
        }

        Ok(Comparator {
            op,
            version: PartialVersion::parse(version_str.trim())?,
        })
    }

    /// Check if a version matches this comparator
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Exact => self.version.matches_exact(version),
            Op::Wildcard => true,
            Op::Greater => match self.version.upper_exclusive() {
                // >1.2 means >=1.3.0
                Some(bound) => version >= &bound,
                None => version > &self.version.to_version(),
            },
            Op::GreaterEq => version >= &self.version.to_version(),
            Op::Less => version < &self.version.to_version(),
            Op::LessEq => match self.version.upper_exclusive() {
                // <=1.2 means <1.3.0
                Some(bound) => version < &bound,
                None => version <= &self.version.to_version(),
            },
            Op::Tilde => self.version.matches_tilde(version),
            Op::Caret => self.version.matches_caret(version),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Op::Exact => "",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Tilde => "~",
            Op::Caret => "^",
            Op::Wildcard => return write!(f, "*"),
        };
        write!(f, "{}{}", op, self.version)
    }
}

fn is_wildcard(s: &str) -> bool {
    matches!(s, "" | "*" | "x" | "X")
}

impl PartialVersion {
    /// Parse a possibly incomplete version (`1`, `1.2`, `1.x`, `1.2.3-beta.1`)
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        let input = input.strip_prefix('v').unwrap_or(input);

        let without_build = input.split_once('+').map_or(input, |(v, _)| v);
        let (core, prerelease) = match without_build.split_once('-') {
            Some((c, p)) => {
                if !valid_identifiers(p) {
                    return Err(VersionError::InvalidPrerelease {
                        prerelease: p.to_string(),
                    });
                }
                (c, Some(p.to_string()))
            },
            None => (without_build, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || is_wildcard(parts[0]) {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let major = parse_number(parts[0])?;
        let minor = match parts.get(1) {
            Some(p) if !is_wildcard(p) => Some(parse_number(p)?),
            _ => None,
        };
        let patch = match (minor, parts.get(2)) {
            (Some(_), Some(p)) if !is_wildcard(p) => Some(parse_number(p)?),
            _ => None,
        };

        if prerelease.is_some() && patch.is_none() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        Ok(PartialVersion {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    fn is_full(&self) -> bool {
        self.minor.is_some() && self.patch.is_some()
    }

    /// Convert to a full version (filling missing parts with 0)
    pub fn to_version(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            prerelease: self.prerelease.clone(),
            build: None,
        }
    }

    /// Smallest version above everything this partial covers (`1.2` -> `1.3.0`)
    fn upper_exclusive(&self) -> Option<Version> {
        match (self.minor, self.patch) {
            (None, _) => Some(Version::new(self.major + 1, 0, 0)),
            (Some(minor), None) => Some(Version::new(self.major, minor + 1, 0)),
            (Some(_), Some(_)) => None,
        }
    }

    /// Check exact match (missing components match anything)
    fn matches_exact(&self, version: &Version) -> bool {
        version.major == self.major
            && self.minor.map_or(true, |m| version.minor == m)
            && self.patch.map_or(true, |p| version.patch == p)
            && (!self.is_full() || version.prerelease == self.prerelease)
    }

    /// Check tilde match (~1.2.3 allows >=1.2.3 <1.3.0, ~1 allows <2.0.0)
    fn matches_tilde(&self, version: &Version) -> bool {
        if version < &self.to_version() {
            return false;
        }

        let upper = match self.minor {
            Some(minor) => Version::new(self.major, minor + 1, 0),
            None => Version::new(self.major + 1, 0, 0),
        };
        version < &upper
    }

    /// Check caret match (^1.2.3 allows <2.0.0, ^0.2.3 allows <0.3.0, ^0.0.3 allows <0.0.4)
    fn matches_caret(&self, version: &Version) -> bool {
        if version < &self.to_version() {
            return false;
        }

        let upper = match (self.major, self.minor, self.patch) {
            (0, Some(0), Some(patch)) => Version::new(0, 0, patch + 1),
            (0, Some(minor), _) => Version::new(0, minor + 1, 0),
            (major, _, _) => Version::new(major + 1, 0, 0),
        };
        version < &upper
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        match self.minor {
            Some(minor) => write!(f, ".{}", minor)?,
            None => return write!(f, ".x"),
        }
        match self.patch {
            Some(patch) => write!(f, ".{}", patch)?,
            None => return write!(f, ".x"),
        }
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert_eq!(v.prerelease, None);
        assert_eq!(v.build, None);

        assert_eq!(Version::from_str("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(Version::from_str("1.2").is_err());
        assert!(Version::from_str("latest").is_err());
        assert!(Version::from_str("1.2.3-").is_err());
    }

    #[test]
    fn test_version_with_prerelease() {
        let v = Version::from_str("1.2.3-alpha.1").unwrap();
        assert_eq!(v.prerelease, Some("alpha.1".to_string()));
        assert_eq!(v.build, None);
    }

    #[test]
    fn test_version_with_build() {
        let v = Version::from_str("1.2.3+build.1").unwrap();
        assert_eq!(v.prerelease, None);
        assert_eq!(v.build, Some("build.1".to_string()));
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");

        let v = Version {
            major: 1,
            minor: 2,
            patch: 3,
            prerelease: Some("alpha".to_string()),
            build: Some("build".to_string()),
        };
        assert_eq!(v.to_string(), "1.2.3-alpha+build");
    }

    #[test]
    fn test_version_comparison() {
        let v1 = Version::new(1, 0, 0);
        let v2 = Version::new(2, 0, 0);
        let v3 = Version::new(1, 1, 0);

        assert!(v1 < v2);
        assert!(v1 < v3);
        assert!(v3 < v2);
    }

    #[test]
    fn test_prerelease_ordering() {
        let parse = |s: &str| Version::from_str(s).unwrap();

        assert!(parse("1.0.0-alpha") < parse("1.0.0-alpha.1"));
        assert!(parse("1.0.0-alpha.1") < parse("1.0.0-alpha.beta"));
        assert!(parse("1.0.0-beta.2") < parse("1.0.0-beta.11"));
        assert!(parse("1.0.0-rc.1") < parse("1.0.0"));
    }

    #[test]
    fn test_version_req_exact() {
        let req = VersionReq::parse("1.2.3").unwrap();
        assert!(req.matches(&Version::new(1, 2, 3)));
        assert!(!req.matches(&Version::new(1, 2, 4)));
    }

    #[test]
    fn test_version_req_wildcard() {
        for input in ["*", "", "x"] {
            let req = VersionReq::parse(input).unwrap();
            assert!(req.matches(&Version::new(1, 2, 3)));
            assert!(req.matches(&Version::new(999, 999, 999)));
        }
    }

    #[test]
    fn test_version_req_caret() {
        let req = VersionReq::parse("^1.2.3").unwrap();

        assert!(req.matches(&Version::new(1, 2, 3)));
        assert!(req.matches(&Version::new(1, 2, 4)));
        assert!(req.matches(&Version::new(1, 3, 0)));

        assert!(!req.matches(&Version::new(2, 0, 0)));
        assert!(!req.matches(&Version::new(0, 9, 9)));
        assert!(!req.matches(&Version::new(1, 2, 2)));
    }

    #[test]
    fn test_version_req_caret_zero_major() {
        let req = VersionReq::parse("^0.2.3").unwrap();
        assert!(req.matches(&Version::new(0, 2, 9)));
        assert!(!req.matches(&Version::new(0, 3, 0)));

        let req = VersionReq::parse("^0.0.3").unwrap();
        assert!(req.matches(&Version::new(0, 0, 3)));
        assert!(!req.matches(&Version::new(0, 0, 4)));
    }

    #[test]
    fn test_version_req_tilde() {
        let req = VersionReq::parse("~1.2.3").unwrap();
        assert!(req.matches(&Version::new(1, 2, 9)));
        assert!(!req.matches(&Version::new(1, 3, 0)));

        let req = VersionReq::parse("~1").unwrap();
        assert!(req.matches(&Version::new(1, 9, 0)));
        assert!(!req.matches(&Version::new(2, 0, 0)));
    }

    #[test]
    fn test_version_req_operators() {
        let v1_2_3 = Version::new(1, 2, 3);
        let v1_2_4 = Version::new(1, 2, 4);
        let v1_3_0 = Version::new(1, 3, 0);

        let req = VersionReq::parse(">1.2.3").unwrap();
        assert!(!req.matches(&v1_2_3));
        assert!(req.matches(&v1_2_4));
        assert!(req.matches(&v1_3_0));

        let req = VersionReq::parse(">=1.2.3").unwrap();
        assert!(req.matches(&v1_2_3));
        assert!(req.matches(&v1_2_4));

        let req = VersionReq::parse("<1.2.4").unwrap();
        assert!(req.matches(&v1_2_3));
        assert!(!req.matches(&v1_2_4));

        let req = VersionReq::parse(">= 1.2.3 < 1.3.0").unwrap();
        assert!(req.matches(&v1_2_4));
        assert!(!req.matches(&v1_3_0));
    }

    #[test]
    fn test_version_req_partials() {
        let req = VersionReq::parse("1.x").unwrap();
        assert!(req.matches(&Version::new(1, 9, 9)));
        assert!(!req.matches(&Version::new(2, 0, 0)));

        let req = VersionReq::parse("<=1.2").unwrap();
        assert!(req.matches(&Version::new(1, 2, 9)));
        assert!(!req.matches(&Version::new(1, 3, 0)));

        let req = VersionReq::parse(">1.2").unwrap();
        assert!(!req.matches(&Version::new(1, 2, 9)));
        assert!(req.matches(&Version::new(1, 3, 0)));
    }

    #[test]
    fn test_version_req_alternatives_and_hyphen() {
        let req = VersionReq::parse("1.x || >=3.0.0").unwrap();
        assert!(req.matches(&Version::new(1, 4, 0)));
        assert!(!req.matches(&Version::new(2, 0, 0)));
        assert!(req.matches(&Version::new(3, 1, 0)));

        let req = VersionReq::parse("1.0.0 - 2.3").unwrap();
        assert!(req.matches(&Version::new(1, 0, 0)));
        assert!(req.matches(&Version::new(2, 3, 7)));
        assert!(!req.matches(&Version::new(2, 4, 0)));
    }

    #[test]
    fn test_prerelease_matching_rule() {
        let beta = Version::from_str("2.0.0-beta.2").unwrap();

        assert!(!VersionReq::parse("*").unwrap().matches(&beta));
        assert!(!VersionReq::parse(">=1.0.0").unwrap().matches(&beta));
        assert!(VersionReq::parse(">=2.0.0-beta.1").unwrap().matches(&beta));
    }

    #[test]
    fn test_oversized_components_rejected() {
        assert_eq!(
            Version::from_str("9007199254740991.0.0").unwrap().major,
            9_007_199_254_740_991
        );
        assert!(Version::from_str("9007199254740992.0.0").is_err());
        assert!(Version::from_str("1.18446744073709551615.0").is_err());

        for input in [
            "<=18446744073709551615",
            "^18446744073709551615",
            "~1.18446744073709551615",
            "18446744073709551615.x",
            "1.0.0 - 18446744073709551615",
        ] {
            assert!(VersionReq::parse(input).is_err(), "{} should be rejected", input);
        }

        // The largest accepted components still bump without overflow
        let req = VersionReq::parse("^9007199254740991 || ~0.9007199254740991").unwrap();
        assert!(req.matches(&Version::new(9_007_199_254_740_991, 5, 0)));
    }

    #[test]
    fn test_version_req_rejects_tags() {
        assert!(VersionReq::parse("latest").is_err());
        assert!(VersionReq::parse("next").is_err());
        assert!(VersionReq::parse(">=").is_err());
    }
}
