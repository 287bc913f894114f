//! Caching layer for computed routes.
//!
//! Route answers only change when the snapshot changes, so entries are
//! keyed by the snapshot's data version as well as the resolved endpoints
//! and the cost ceiling; entries for superseded versions simply stop being
//! hit and age out through the TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Itinerary, StationId};

/// Cache key: (origin, destination, cost-ceiling bucket, data version).
/// The ceiling is bucketed to deciseconds so float noise in request
/// parameters cannot fragment the cache.
type RouteKey = (StationId, StationId, Option<u64>, String);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 4096,
        }
    }
}

/// Cache of successful route computations.
///
/// Only itineraries are cached; errors are cheap to recompute and should
/// not outlive the conditions that produced them.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<Itinerary>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Build a cache key for a query.
    pub fn key(
        origin: &StationId,
        destination: &StationId,
        max_cost_secs: Option<f64>,
        version: &str,
    ) -> RouteKey {
        let bucket = max_cost_secs.map(|secs| (secs * 10.0).round() as u64);
        (
            origin.clone(),
            destination.clone(),
            bucket,
            version.to_string(),
        )
    }

    pub async fn get(&self, key: &RouteKey) -> Option<Arc<Itinerary>> {
        self.routes.get(key).await
    }

    pub async fn insert(&self, key: RouteKey, itinerary: Arc<Itinerary>) {
        self.routes.insert(key, itinerary).await;
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::new(s)
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 4096);
    }

    #[test]
    fn ceiling_buckets_to_deciseconds() {
        let a = RouteCache::key(&sid("a"), &sid("b"), Some(600.0), "v1");
        let b = RouteCache::key(&sid("a"), &sid("b"), Some(600.04), "v1");
        let c = RouteCache::key(&sid("a"), &sid("b"), Some(600.2), "v1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unbounded_and_bounded_keys_differ() {
        let unbounded = RouteCache::key(&sid("a"), &sid("b"), None, "v1");
        let bounded = RouteCache::key(&sid("a"), &sid("b"), Some(0.0), "v1");
        assert_ne!(unbounded, bounded);
    }

    #[test]
    fn version_partitions_keys() {
        let v1 = RouteCache::key(&sid("a"), &sid("b"), None, "v1");
        let v2 = RouteCache::key(&sid("a"), &sid("b"), None, "v2");
        assert_ne!(v1, v2);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = RouteCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
        let key = RouteCache::key(&sid("a"), &sid("b"), None, "v1");

        assert!(cache.get(&key).await.is_none());
        cache.insert(key.clone(), Arc::new(Itinerary::empty())).await;
        assert!(cache.get(&key).await.is_some());
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let cache = RouteCache::new(&CacheConfig::default());
        let key = RouteCache::key(&sid("a"), &sid("b"), None, "v1");
        cache.insert(key.clone(), Arc::new(Itinerary::empty())).await;

        cache.invalidate_all();
        assert!(cache.get(&key).await.is_none());
    }
}
