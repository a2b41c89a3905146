//! Cache statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for [`CopyOnWriteLeakyCache`](super::CopyOnWriteLeakyCache) operations.
///
/// All counters are atomic and can be read from any thread while the cache
/// is in use. They are informational only and never influence cache behaviour.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups answered from the published map.
    hits: AtomicU64,
    /// Lookups that had to compute a value.
    misses: AtomicU64,
    /// Compute function invocations that returned a value.
    computations: AtomicU64,
    /// Compute function invocations that failed.
    failures: AtomicU64,
    /// Maps published.
    publications: AtomicU64,
    /// Compare-and-swap attempts that lost against another writer.
    publish_retries: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_computation(&self) {
        self.computations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_publication(&self) {
        self.publications.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_publish_retry(&self) {
        self.publish_retries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn publications(&self) -> u64 {
        self.publications.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn publish_retries(&self) -> u64 {
        self.publish_retries.load(Ordering::Relaxed)
    }

    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.computations.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.publications.store(0, Ordering::Relaxed);
        self.publish_retries.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_counts_hits_and_misses() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert!((stats.hit_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn reset_clears_everything() {
        let stats = CacheStats::new();
        stats.record_computation();
        stats.record_failure();
        stats.record_publication();
        stats.record_publish_retry();
        stats.reset();

        assert_eq!(stats.computations(), 0);
        assert_eq!(stats.failures(), 0);
        assert_eq!(stats.publications(), 0);
        assert_eq!(stats.publish_retries(), 0);
    }
}
