//! Name resolution caching with TTL and weight bounds

use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

/// Default aggregate weight ceiling (200 MiB)
pub const DEFAULT_MAX_WEIGHT: u64 = 200 * 1024 * 1024;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Bounds applied to a [`ResolutionCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Aggregate weight above which least recently used entries are evicted
    pub max_weight: u64,
    /// Age after which an entry is treated as absent
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
            ttl: DEFAULT_TTL,
        }
    }
}

/// Cached resolution of one name
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Resolved content id
    pub content_id: String,
    /// Weight counted against the ceiling
    pub weight: u64,
    /// When the entry was stored
    pub stored_at: Instant,
}

impl CacheEntry {
    fn new(content_id: String, weight: u64) -> Self {
        Self {
            content_id,
            weight,
            stored_at: Instant::now(),
        }
    }

    /// Check if the entry is younger than `ttl`
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }

    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

struct Inner {
    entries: LruCache<String, CacheEntry>,
    total_weight: u64,
}

impl Inner {
    fn remove(&mut self, name: &str) -> Option<CacheEntry> {
        let entry = self.entries.pop(name)?;
        self.total_weight -= entry.weight;
        Some(entry)
    }

    fn evict(&mut self, max_weight: u64) {
        while self.total_weight > max_weight {
            match self.entries.pop_lru() {
                Some((name, entry)) => {
                    debug!("Evicting {} from resolution cache", name);
                    self.total_weight -= entry.weight;
                },
                None => break,
            }
        }
    }
}

/// Bounded, time-expiring memo of name to content id resolutions
pub struct ResolutionCache {
    policy: CachePolicy,
    inner: Mutex<Inner>,
}

impl ResolutionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                total_weight: 0,
            }),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Cached content id if fresh; promotes the entry
    pub fn get(&self, name: &str) -> Option<String> {
        let mut inner = self.inner.lock();
        let fresh = inner.entries.get(name)?.is_fresh(self.policy.ttl);
        if fresh {
            inner.entries.peek(name).map(|entry| entry.content_id.clone())
        } else {
            inner.remove(name);
            None
        }
    }

    /// Whether a fresh entry exists; does not promote
    pub fn has(&self, name: &str) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.peek(name) {
            Some(entry) if entry.is_fresh(self.policy.ttl) => true,
            Some(_) => {
                inner.remove(name);
                false
            },
            None => false,
        }
    }

    /// Store a resolution weighted by the content id's length
    pub fn put(&self, name: &str, content_id: &str) {
        self.put_weighted(name, content_id, content_id.len() as u64);
    }

    /// Store a resolution with an explicit weight; replaces any previous entry
    pub fn put_weighted(&self, name: &str, content_id: &str, weight: u64) {
        let mut inner = self.inner.lock();
        inner.remove(name);

        if weight > self.policy.max_weight {
            debug!("Not caching {}: weight {} exceeds ceiling", name, weight);
            return;
        }

        inner
            .entries
            .put(name.to_string(), CacheEntry::new(content_id.to_string(), weight));
        inner.total_weight += weight;
        inner.evict(self.policy.max_weight);
    }

    /// Change the weight of an existing entry, keeping its age
    pub fn reweigh(&self, name: &str, weight: u64) -> bool {
        let mut inner = self.inner.lock();

        let previous = match inner.entries.get_mut(name) {
            Some(entry) => std::mem::replace(&mut entry.weight, weight),
            None => return false,
        };
        inner.total_weight = inner.total_weight - previous + weight;

        if weight > self.policy.max_weight {
            inner.remove(name);
            return false;
        }

        inner.evict(self.policy.max_weight);
        inner.entries.contains(name)
    }

    /// Clear all cached entries
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.total_weight = 0;
    }

    /// Remove expired entries
    pub fn prune_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(self.policy.ttl))
            .map(|(name, _)| name.clone())
            .collect();

        for name in &expired {
            inner.remove(name);
        }
        expired.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let fresh_entries = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_fresh(self.policy.ttl))
            .count();

        CacheStats {
            total_entries: inner.entries.len(),
            fresh_entries,
            stale_entries: inner.entries.len() - fresh_entries,
            total_weight: inner.total_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_weight(&self) -> u64 {
        self.inner.lock().total_weight
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("policy", &self.policy)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of fresh entries
    pub fresh_entries: usize,
    /// Number of stale entries
    pub stale_entries: usize,
    /// Aggregate weight of all entries
    pub total_weight: u64,
}
