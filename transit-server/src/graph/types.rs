//! Graph representation.
//!
//! Nodes are *platforms*: one (station, line) pair per line calling at a
//! station. Modeling platforms rather than stations lets the in-station
//! change penalty and the transfer/wild tie-breaks fall directly out of
//! the edge structure instead of being special-cased during search.

use std::collections::HashMap;

use crate::domain::{LineId, StationId};

/// Index of a platform node within a graph.
pub type NodeIdx = usize;

/// One (station, line) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub station: StationId,
    pub line: LineId,
}

/// How an edge is traversed.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    /// Ride the platform's line to the next station.
    Ride,

    /// Change lines within one station.
    Change,

    /// Walk an out-of-station interchange between two stations.
    Transfer { distance: f64 },

    /// Walk cross-terrain between two stations.
    Wild { distance: f64 },
}

impl EdgeKind {
    /// Whether traversing this edge counts as a transfer for tie-breaking.
    pub fn is_transfer(&self) -> bool {
        matches!(self, EdgeKind::Change | EdgeKind::Transfer { .. })
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, EdgeKind::Wild { .. })
    }
}

/// A directed, weighted edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub to: NodeIdx,
    pub secs: f64,
    pub kind: EdgeKind,
}

/// The immutable routable multigraph.
///
/// Built once per snapshot and never mutated afterwards; queries share it
/// behind an `Arc` with no locking.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    nodes: Vec<Platform>,
    adjacency: Vec<Vec<GraphEdge>>,
    by_station: HashMap<StationId, Vec<NodeIdx>>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a platform node. The caller is responsible for not adding the
    /// same (station, line) pair twice.
    pub fn add_platform(&mut self, station: StationId, line: LineId) -> NodeIdx {
        let idx = self.nodes.len();
        self.by_station
            .entry(station.clone())
            .or_default()
            .push(idx);
        self.nodes.push(Platform { station, line });
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add a directed edge.
    pub fn add_edge(&mut self, from: NodeIdx, edge: GraphEdge) {
        self.adjacency[from].push(edge);
    }

    /// Add the same edge in both directions.
    pub fn add_edge_symmetric(&mut self, a: NodeIdx, b: NodeIdx, secs: f64, kind: EdgeKind) {
        self.add_edge(
            a,
            GraphEdge {
                to: b,
                secs,
                kind: kind.clone(),
            },
        );
        self.add_edge(b, GraphEdge { to: a, secs, kind });
    }

    pub fn node(&self, idx: NodeIdx) -> &Platform {
        &self.nodes[idx]
    }

    pub fn edges_from(&self, idx: NodeIdx) -> &[GraphEdge] {
        &self.adjacency[idx]
    }

    /// Platform nodes of a station; empty for stations not in the graph.
    pub fn platforms_of(&self, station: &StationId) -> &[NodeIdx] {
        self.by_station
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_station(&self, station: &StationId) -> bool {
        self.by_station.contains_key(station)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn station_count(&self) -> usize {
        self.by_station.len()
    }

    /// Stations present in the graph.
    pub fn stations(&self) -> impl Iterator<Item = &StationId> {
        self.by_station.keys()
    }
}
