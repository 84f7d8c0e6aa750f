//! Caching layer for route searches.
//!
//! Searches are pure functions of the knowledge base and the query, so
//! results can be reused until the knowledge base changes. Every mutation
//! must call [`RouteCache::invalidate_all`].

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Metric, StationId};
use crate::planner::Route;

/// Cache key for route searches: (start, goal, metric, penalty bits).
/// The penalty is keyed by its bit pattern since `f64` is not `Hash`.
type RouteKey = (StationId, StationId, Metric, u64);

/// Cached search outcome; `None` records that no route exists.
pub type CachedRoute = Arc<Option<Route>>;

/// Configuration for the cache.
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
            max_capacity: 1000,
        }
    }
}

/// Cache of route search outcomes.
pub struct RouteCache {
    routes: MokaCache<RouteKey, CachedRoute>,
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

    fn key(start: &StationId, goal: &StationId, metric: Metric, penalty: f64) -> RouteKey {
        (start.clone(), goal.clone(), metric, penalty.to_bits())
    }

    /// Get a cached outcome.
    pub async fn get(
        &self,
        start: &StationId,
        goal: &StationId,
        metric: Metric,
        penalty: f64,
    ) -> Option<CachedRoute> {
        self.routes
            .get(&Self::key(start, goal, metric, penalty))
            .await
    }

    /// Insert an outcome into the cache.
    pub async fn insert(
        &self,
        start: &StationId,
        goal: &StationId,
        metric: Metric,
        penalty: f64,
        outcome: CachedRoute,
    ) {
        self.routes
            .insert(Self::key(start, goal, metric, penalty), outcome)
            .await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
