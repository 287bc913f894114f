//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RouteCache};
use crate::planner::SearchOptions;
use crate::snapshot::SnapshotStore;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Holder of the current network snapshot
    pub store: SnapshotStore,

    /// Cache of computed routes
    pub cache: Arc<RouteCache>,

    /// Server-side defaults merged into each query
    pub search: SearchOptions,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SnapshotStore, cache_config: &CacheConfig, search: SearchOptions) -> Self {
        Self {
            store,
            cache: Arc::new(RouteCache::new(cache_config)),
            search,
        }
    }
}
