//! Copy-on-write memo cache with lock-free reads.
//!
//! The cache publishes one immutable `HashMap` at a time through an
//! [`ArcSwap`]. Readers load the current map and never lock. A miss copies
//! the whole map, adds the new entry and publishes the copy, so every miss
//! costs O(n) and nothing is ever evicted.
//!
//! Use it for small, bounded key spaces where reads vastly outnumber writes,
//! such as per-type metadata derived from a schema.

use super::stats::CacheStats;
use arc_swap::{ArcSwap, Guard};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// How a writer publishes its copy after a miss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPolicy {
    /// Store the copy unconditionally. Concurrent misses may both compute,
    /// and the last store wins, which can drop another writer's fresh entry.
    #[default]
    Blind,

    /// Publish with compare-and-swap against the map the copy was built
    /// from, rebuilding on conflict. No entry is ever lost; if the key was
    /// published by another writer in the meantime, that value is returned.
    CompareAndSwap,
}

impl fmt::Display for PublishPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blind => "blind",
            Self::CompareAndSwap => "compare_and_swap",
        };
        write!(f, "{}", name)
    }
}

/// A grow-only memo cache whose published map is never mutated in place.
///
/// ## Usage
///
/// ```rust
/// use uidl::cache::CopyOnWriteLeakyCache;
///
/// let cache: CopyOnWriteLeakyCache<String, usize> = CopyOnWriteLeakyCache::new();
/// let len = cache.compute_if_absent("UiPanel".to_string(), |k| k.len());
/// assert_eq!(len, 7);
/// assert_eq!(cache.compute_if_absent("UiPanel".to_string(), |_| 0), 7);
/// ```
pub struct CopyOnWriteLeakyCache<K, V> {
    // Invariant: the map behind this pointer is never modified after store.
    map: ArcSwap<HashMap<K, V>>,
    policy: PublishPolicy,
    stats: CacheStats,
}

impl<K, V> CopyOnWriteLeakyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache with the default [`PublishPolicy::Blind`]
    pub fn new() -> Self {
        Self::with_policy(PublishPolicy::default())
    }

    /// Create an empty cache with an explicit publish policy
    pub fn with_policy(policy: PublishPolicy) -> Self {
        Self {
            map: ArcSwap::from_pointee(HashMap::new()),
            policy,
            stats: CacheStats::new(),
        }
    }

    /// Return the cached value for `key`, computing and publishing it on a miss.
    pub fn compute_if_absent<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_compute_if_absent(key, |k| Ok::<V, Infallible>(compute(k))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`compute_if_absent`](Self::compute_if_absent) with a fallible
    /// compute function.
    ///
    /// On `Err` nothing is published: the key stays absent and the next call
    /// computes again.
    pub fn try_compute_if_absent<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        let current = self.map.load();
        if let Some(value) = current.get(&key) {
            self.stats.record_hit();
            return Ok(value.clone());
        }
        self.stats.record_miss();

        match self.policy {
            PublishPolicy::Blind => {
                let mut copy = HashMap::clone(&current);
                drop(current);

                let value = self.run(&key, compute)?;
                copy.insert(key, value.clone());
                self.map.store(Arc::new(copy));
                self.stats.record_publication();
                Ok(value)
            }
            PublishPolicy::CompareAndSwap => {
                drop(current);
                let value = self.run(&key, compute)?;
                Ok(self.publish_with_cas(key, value))
            }
        }
    }

    /// Look up a key without computing anything
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.load().get(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.load().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.load().is_empty()
    }

    /// The currently published map. It stays valid and unchanged for as
    /// long as the caller holds it, regardless of later publications.
    pub fn snapshot(&self) -> Arc<HashMap<K, V>> {
        self.map.load_full()
    }

    pub fn policy(&self) -> PublishPolicy {
        self.policy
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn run<F, E>(&self, key: &K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        match compute(key) {
            Ok(value) => {
                self.stats.record_computation();
                Ok(value)
            }
            Err(e) => {
                self.stats.record_failure();
                Err(e)
            }
        }
    }

    fn publish_with_cas(&self, key: K, value: V) -> V {
        let mut current = self.map.load_full();
        loop {
            if let Some(existing) = current.get(&key) {
                return existing.clone();
            }

            let mut next = HashMap::clone(&current);
            next.insert(key.clone(), value.clone());

            let previous = self.map.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &current) {
                self.stats.record_publication();
                return value;
            }

            trace!("copy-on-write publish lost a race, rebuilding");
            self.stats.record_publish_retry();
            current = Guard::into_inner(previous);
        }
    }
}

impl<K, V> Default for CopyOnWriteLeakyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for CopyOnWriteLeakyCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOnWriteLeakyCache")
            .field("len", &self.map.load().len())
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}
