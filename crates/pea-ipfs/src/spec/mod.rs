//! Request spec parsing
//!
//! A fetch request is `<protocol>://<payload>`. Direct requests carry a
//! content id (`ipfs://<cid>`), mutable-name requests carry a name and an
//! optional version fragment (`ipns://<name>#<version-or-tag>`).

use std::fmt;
use std::str::FromStr;

use pea_core::error::PeaError;
use crate::IpfsResult;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Storage protocol a request is addressed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Immutable content address
    Ipfs,
    /// Mutable name resolving to a content address
    Ipns,
}

impl Protocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Ipfs => "ipfs",
            Protocol::Ipns => "ipns",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ipfs" => Ok(Protocol::Ipfs),
            "ipns" => Ok(Protocol::Ipns),
            other => Err(PeaError::InvalidSpec {
                spec: s.to_string(),
                reason: format!("unknown protocol '{}', expected ipfs or ipns", other),
            }),
        }
    }
}

/// A parsed `<protocol>://<payload>` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSpec {
    protocol: Protocol,
    raw: String,
    payload_start: usize,
}

impl FetchSpec {
    pub fn parse(raw: &str) -> IpfsResult<Self> {
        let raw = raw.trim();
        let (scheme, payload) = raw.split_once("://").ok_or_else(|| PeaError::InvalidSpec {
            spec: raw.to_string(),
            reason: "expected <protocol>://<identifier>".to_string(),
        })?;

        let protocol = scheme.parse::<Protocol>().map_err(|_| PeaError::InvalidSpec {
            spec: raw.to_string(),
            reason: format!("unknown protocol '{}', expected ipfs or ipns", scheme),
        })?;

        if payload.trim().is_empty() {
            return Err(PeaError::InvalidSpec {
                spec: raw.to_string(),
                reason: "missing identifier".to_string(),
            });
        }

        Ok(Self {
            protocol,
            raw: raw.to_string(),
            payload_start: scheme.len() + "://".len(),
        })
    }

    /// Direct request for a content id
    pub fn ipfs(cid: &ContentId) -> Self {
        let raw = format!("ipfs://{}", cid.as_str());
        Self {
            protocol: Protocol::Ipfs,
            raw,
            payload_start: "ipfs://".len(),
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The full request as given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Everything after `://`
    pub fn payload(&self) -> &str {
        &self.raw[self.payload_start..]
    }

    /// Name and fragment of a mutable-name request
    pub fn name_spec(&self) -> IpfsResult<NameSpec> {
        NameSpec::parse(self.payload()).map_err(|e| match e {
            PeaError::InvalidSpec { reason, .. } => PeaError::InvalidSpec {
                spec: self.raw.clone(),
                reason,
            },
            other => other,
        })
    }

    /// Content id of a direct request
    pub fn content_id(&self) -> IpfsResult<ContentId> {
        ContentId::parse(self.payload())
    }
}

impl FromStr for FetchSpec {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FetchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `<name>#<fragment>` payload of a mutable-name request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSpec {
    /// Name to resolve
    pub name: String,
    /// Wanted version, range or dist-tag
    pub fragment: Option<String>,
}

impl NameSpec {
    pub fn parse(payload: &str) -> IpfsResult<Self> {
        let (name, fragment) = match payload.split_once('#') {
            Some((name, fragment)) => (name, Some(fragment)),
            None => (payload, None),
        };

        let name = name.trim();
        let name = name.strip_prefix("/ipns/").unwrap_or(name).trim_end_matches('/');
        if name.is_empty() {
            return Err(PeaError::InvalidSpec {
                spec: payload.to_string(),
                reason: "missing name".to_string(),
            });
        }

        let fragment = fragment
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            fragment,
        })
    }
}

impl fmt::Display for NameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.name, fragment),
            None => f.write_str(&self.name),
        }
    }
}

/// Validated content identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    /// Parse a CID, accepting an `ipfs://` or `/ipfs/` prefix
    pub fn parse(input: &str) -> IpfsResult<Self> {
        let invalid = |reason: &str| PeaError::InvalidContentId {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let cid = strip_ipfs_prefix(input).trim_end_matches('/');
        if cid.is_empty() {
            return Err(invalid("empty content id"));
        }

        if cid.starts_with("Qm") {
            if cid.len() != 46 {
                return Err(invalid("CIDv0 must be 46 characters"));
            }
            if !cid.chars().all(|c| BASE58_ALPHABET.contains(c)) {
                return Err(invalid("CIDv0 must be base58btc"));
            }
            return Ok(Self(cid.to_string()));
        }

        let mut chars = cid.chars();
        let prefix = chars.next().unwrap_or_default();
        let body = chars.as_str();

        // Only padded and unpadded base64 may contain '/'
        if cid.contains('/') && !matches!(prefix, 'm' | 'M') {
            return Err(invalid("content paths are not supported"));
        }
        if body.len() < 8 {
            return Err(invalid("too short"));
        }


        let valid = match prefix {
            'b' => body.chars().all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c)),
            'B' => body.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)),
            'k' => body.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()),
            'K' => body.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
            'z' => body.chars().all(|c| BASE58_ALPHABET.contains(c)),
            'f' => body.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            'F' => body.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
            'm' => body.chars().all(is_base64),
            'M' => padded(body, is_base64),
            'u' => body.chars().all(is_base64url),
            'U' => padded(body, is_base64url),
            _ => return Err(invalid("unsupported multibase prefix")),
        };

        if valid {
            Ok(Self(cid.to_string()))
        } else {
            Err(invalid("characters outside the multibase alphabet"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/ipfs/<cid>` path on the storage network
    pub fn path(&self) -> String {
        format!("/ipfs/{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A content id followed by an optional path inside it (`<cid>/a/b.json`)
///
/// Name resolution and `dist.cid` values may point below a directory root;
/// only the leading segment is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPath {
    cid: ContentId,
    subpath: Option<String>,
}

impl ContentPath {
    /// Parse `<cid>[/<path>]`, accepting an `ipfs://` or `/ipfs/` prefix
    pub fn parse(input: &str) -> IpfsResult<Self> {
        if let Ok(cid) = ContentId::parse(input) {
            return Ok(Self { cid, subpath: None });
        }

        let stripped = strip_ipfs_prefix(input);
        let (root, rest) = stripped.split_once('/').unwrap_or((stripped, ""));
        let cid = ContentId::parse(root).map_err(|e| match e {
            PeaError::InvalidContentId { reason, .. } => PeaError::InvalidContentId {
                input: input.to_string(),
                reason,
            },
            other => other,
        })?;

        let rest = rest.trim_matches('/');
        Ok(Self {
            cid,
            subpath: (!rest.is_empty()).then(|| rest.to_string()),
        })
    }

    /// The root content id
    pub fn cid(&self) -> &ContentId {
        &self.cid
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }

    /// `/ipfs/<cid>[/<path>]` on the storage network
    pub fn path(&self) -> String {
        format!("/ipfs/{}", self)
    }
}

impl From<ContentId> for ContentPath {
    fn from(cid: ContentId) -> Self {
        Self { cid, subpath: None }
    }
}

impl FromStr for ContentPath {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subpath {
            Some(subpath) => write!(f, "{}/{}", self.cid, subpath),
            None => write!(f, "{}", self.cid),
        }
    }
}

fn is_base64(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

fn is_base64url(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// At most two `=` of padding after a body in the given alphabet
fn padded(body: &str, valid: fn(char) -> bool) -> bool {
    let unpadded = body.trim_end_matches('=');
    body.len() - unpadded.len() <= 2 && unpadded.chars().all(valid)
}

fn strip_ipfs_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix("ipfs://").unwrap_or(trimmed);
    stripped.strip_prefix("/ipfs/").unwrap_or(stripped)
}
