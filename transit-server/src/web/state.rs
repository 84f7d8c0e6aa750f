//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheConfig, RouteCache};
use crate::domain::StationId;
use crate::knowledge::{EdgeFact, KnowledgeBase};
use crate::planner::{PlannerConfig, PlannerError, Route, RouteRequest, find_route};

/// Shared application state.
///
/// The knowledge base sits behind a reader-writer lock: searches share the
/// read side, route insertion and reconciliation take the write side.
#[derive(Clone)]
pub struct AppState {
    /// Transit network facts
    pub kb: Arc<RwLock<KnowledgeBase>>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,

    /// Memoized search outcomes
    pub cache: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state.
    ///
    /// The knowledge base is reconciled before it is shared.
    pub fn new(mut kb: KnowledgeBase, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        kb.reconcile(config.transfer_walk_time);
        Self {
            kb: Arc::new(RwLock::new(kb)),
            config: Arc::new(config),
            cache: Arc::new(RouteCache::new(cache_config)),
        }
    }

    /// Registered stations, sorted.
    pub async fn stations(&self) -> Vec<StationId> {
        self.kb.read().await.stations()
    }

    /// Insert a base fact, reconcile, and drop cached searches.
    ///
    /// Returns the edge and station counts afterwards.
    pub async fn add_route(&self, fact: EdgeFact) -> (usize, usize) {
        let mut kb = self.kb.write().await;
        info!(
            from = %fact.from,
            to = %fact.to,
            mode = %fact.mode,
            time = fact.time,
            cost = fact.cost,
            "adding route"
        );
        kb.add_edge(
            fact.from,
            fact.to,
            fact.mode,
            fact.time,
            fact.cost,
            fact.bidirectional,
        );
        kb.reconcile(self.config.transfer_walk_time);
        self.cache.invalidate_all();
        (kb.len(), kb.stations().len())
    }

    /// Validate and answer a route query, consulting the cache first.
    pub async fn plan(&self, request: &RouteRequest) -> Result<Route, PlannerError> {
        // Held until the outcome is cached so a concurrent insert cannot
        // interleave between search and cache write
        let kb = self.kb.read().await;
        request.validate(&kb)?;

        let penalty = self.config.mode_switch_penalty;
        let outcome = match self
            .cache
            .get(&request.start, &request.goal, request.metric, penalty)
            .await
        {
            Some(cached) => {
                debug!(start = %request.start, goal = %request.goal, "route cache hit");
                cached
            }
            None => {
                let found = find_route(&kb, &request.start, &request.goal, request.metric, penalty);
                let outcome = Arc::new(found);
                self.cache
                    .insert(
                        &request.start,
                        &request.goal,
                        request.metric,
                        penalty,
                        outcome.clone(),
                    )
                    .await;
                outcome
            }
        };

        (*outcome).clone().ok_or_else(|| PlannerError::NoRouteFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        })
    }
}
