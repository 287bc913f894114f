//! The shared network snapshot.
//!
//! Everything a query needs (model, graph, alias table) is bundled into
//! one immutable [`NetworkSnapshot`]. Queries clone an `Arc` to it and are
//! unaffected by refreshes. Refreshing builds a replacement off to the
//! side and swaps the reference; a failed refresh keeps the previous
//! snapshot in service and only flips the staleness flag, favoring
//! availability over freshness.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::alias::{AliasError, AliasResolver};
use crate::graph::{BuildConfig, BuildError, GraphBuilder, TransitGraph};
use crate::map::{MapError, MapSource, RawNetworkModel};
use crate::overrides::{OverrideConfig, OverrideError, OverrideRegistry};

/// An immutable, internally consistent view of the network.
#[derive(Debug)]
pub struct NetworkSnapshot {
    pub model: RawNetworkModel,
    pub graph: TransitGraph,
    pub aliases: AliasResolver,
    pub built_at: DateTime<Utc>,
}

/// A rebuild that could not produce a usable snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    Overrides(#[from] OverrideError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A refresh attempt that left the previous snapshot in service.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("map fetch failed: {0}")]
    Fetch(#[from] MapError),

    #[error("snapshot rebuild failed: {0}")]
    Rebuild(#[from] SnapshotError),
}

impl NetworkSnapshot {
    /// Build a snapshot from a fetched model and the admin configuration.
    ///
    /// Pipeline: alias table first (override names resolve through it),
    /// then the override registry, then the graph.
    pub fn build(
        model: RawNetworkModel,
        overrides: &OverrideConfig,
        build: &BuildConfig,
    ) -> Result<Self, SnapshotError> {
        let aliases = AliasResolver::build(&model.stations, &overrides.aliases)?;
        let registry = OverrideRegistry::resolve(overrides, &aliases)?;
        let graph = GraphBuilder::new(&model, &registry, build).build()?;

        tracing::info!(
            stations = graph.station_count(),
            platforms = graph.node_count(),
            edges = graph.edge_count(),
            version = %model.version,
            "network snapshot built"
        );

        Ok(Self {
            model,
            graph,
            aliases,
            built_at: Utc::now(),
        })
    }
}

struct StoreState {
    snapshot: Arc<NetworkSnapshot>,
    stale: bool,
}

/// What a query sees: the snapshot it should use, and whether a newer one
/// failed to materialize.
#[derive(Clone)]
pub struct SnapshotView {
    pub snapshot: Arc<NetworkSnapshot>,
    pub stale: bool,
}

/// Holder of the current snapshot, shared across queries and the refresh
/// task.
#[derive(Clone)]
pub struct SnapshotStore {
    state: Arc<RwLock<StoreState>>,
    overrides: Arc<OverrideConfig>,
    build: Arc<BuildConfig>,
}

impl SnapshotStore {
    /// Create a store around an initial snapshot, remembering the config
    /// future rebuilds should use.
    pub fn new(initial: NetworkSnapshot, overrides: OverrideConfig, build: BuildConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                snapshot: Arc::new(initial),
                stale: false,
            })),
            overrides: Arc::new(overrides),
            build: Arc::new(build),
        }
    }

    /// The snapshot queries should read right now.
    pub async fn current(&self) -> SnapshotView {
        let guard = self.state.read().await;
        SnapshotView {
            snapshot: guard.snapshot.clone(),
            stale: guard.stale,
        }
    }

    /// Fetch fresh map data and swap in a rebuilt snapshot.
    ///
    /// All fetching and building happens before the write lock is taken,
    /// so queries never wait on network I/O or construction. On failure
    /// the previous snapshot stays in service, marked stale. Returns the
    /// station count of the new snapshot.
    pub async fn refresh<S: MapSource>(&self, source: &S) -> Result<usize, RefreshError> {
        let result: Result<NetworkSnapshot, RefreshError> = match source.fetch().await {
            Ok(model) => {
                NetworkSnapshot::build(model, &self.overrides, &self.build).map_err(Into::into)
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(snapshot) => {
                let count = snapshot.graph.station_count();
                let mut guard = self.state.write().await;
                guard.snapshot = Arc::new(snapshot);
                guard.stale = false;
                Ok(count)
            }
            Err(e) => {
                let mut guard = self.state.write().await;
                guard.stale = true;
                Err(e)
            }
        }
    }
}
