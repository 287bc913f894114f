//! Graph construction.
//!
//! Turns the raw network model, the alias-resolved override registry, and
//! the build configuration into a [`TransitGraph`]. Construction is the
//! only place edges come from; the search layer never consults config.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::domain::{Line, LineId, StationId};
use crate::map::RawNetworkModel;
use crate::overrides::OverrideRegistry;

use super::types::{EdgeKind, GraphEdge, NodeIdx, TransitGraph};

/// Walking speed for out-of-station interchanges, blocks/s.
pub const TRANSFER_WALK_SPEED: f64 = 4.317;

/// Walking speed across open terrain, blocks/s.
pub const WILD_WALK_SPEED: f64 = 2.25;

/// Default ceiling for automatic wild-transfer links, blocks.
pub const DEFAULT_MAX_WILD_DISTANCE: f64 = 1500.0;

/// Default in-station line-change penalty, seconds.
pub const DEFAULT_CHANGE_PENALTY_SECS: f64 = 30.0;

/// Tunables for graph construction.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Maximum distance for automatic wild-transfer edges, blocks.
    pub max_wild_distance: f64,

    /// Fixed in-station line-change penalty, seconds. May be zero.
    pub change_penalty_secs: f64,

    /// Walking speed used to price out-of-station interchanges, blocks/s.
    pub transfer_walk_speed: f64,

    /// Walking speed used to price wild transfers, blocks/s.
    pub wild_walk_speed: f64,

    /// Whether to generate wild-transfer edges at all.
    pub enable_wild: bool,

    /// Whether high-speed lines are routable.
    pub include_high_speed: bool,

    /// Whether boat lines are routable.
    pub include_boat: bool,

    /// Restrict routing to light-rail lines only.
    pub only_light_rail: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_wild_distance: DEFAULT_MAX_WILD_DISTANCE,
            change_penalty_secs: DEFAULT_CHANGE_PENALTY_SECS,
            transfer_walk_speed: TRANSFER_WALK_SPEED,
            wild_walk_speed: WILD_WALK_SPEED,
            enable_wild: true,
            include_high_speed: true,
            include_boat: true,
            only_light_rail: false,
        }
    }
}

/// Construction failure. Overrides are validated before construction, so
/// the only data error left is a structurally unusable line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("line {0:?} has no stations")]
    EmptyLine(String),
}

/// Builds a [`TransitGraph`] from a model, overrides, and config.
pub struct GraphBuilder<'a> {
    model: &'a RawNetworkModel,
    overrides: &'a OverrideRegistry,
    config: &'a BuildConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        model: &'a RawNetworkModel,
        overrides: &'a OverrideRegistry,
        config: &'a BuildConfig,
    ) -> Self {
        Self {
            model,
            overrides,
            config,
        }
    }

    pub fn build(&self) -> Result<TransitGraph, BuildError> {
        let lines = self.routable_lines()?;

        let mut graph = TransitGraph::new();
        let mut platforms: HashMap<(StationId, LineId), NodeIdx> = HashMap::new();

        self.add_platforms_and_rides(&lines, &mut graph, &mut platforms);
        self.add_changes(&mut graph);
        let linked = self.add_transfers(&mut graph);
        if self.config.enable_wild {
            self.add_wilds(&mut graph, &linked);
        }
        self.warn_isolated(&graph);

        tracing::debug!(
            stations = graph.station_count(),
            platforms = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );

        Ok(graph)
    }

    /// Lines that survive exclusion filters. A zero-station line is a
    /// construction error; a one-station line cannot carry a segment and
    /// is dropped with a warning.
    fn routable_lines(&self) -> Result<Vec<&'a Line>, BuildError> {
        let mut lines = Vec::new();
        for line in &self.model.lines {
            if line.stations.is_empty() {
                return Err(BuildError::EmptyLine(line.name.clone()));
            }

            let lowered = line.name.to_lowercase();
            if lowered.contains("placeholder") || lowered.contains("dummy") {
                continue;
            }
            if self.overrides.is_line_ignored(line) {
                continue;
            }
            if !self.config.include_high_speed && line.kind.is_high_speed() {
                continue;
            }
            if !self.config.include_boat && line.kind.is_boat() {
                continue;
            }
            if self.config.only_light_rail && !line.kind.is_light_rail() {
                continue;
            }
            if line.stations.len() < 2 {
                tracing::warn!(line = %line.name, "line has a single station, dropped");
                continue;
            }

            lines.push(line);
        }
        Ok(lines)
    }

    /// One platform per (station, line), plus directed ride edges along
    /// each line's consecutive pairs. Avoided stations get no platforms,
    /// which severs the line at that point.
    fn add_platforms_and_rides(
        &self,
        lines: &[&Line],
        graph: &mut TransitGraph,
        platforms: &mut HashMap<(StationId, LineId), NodeIdx>,
    ) {
        for line in lines {
            for station in &line.stations {
                if self.overrides.is_station_avoided(station) {
                    continue;
                }
                platforms
                    .entry((station.clone(), line.id.clone()))
                    .or_insert_with(|| graph.add_platform(station.clone(), line.id.clone()));
            }
        }

        for line in lines {
            for (i, secs) in line.segment_secs.iter().enumerate() {
                let from = &line.stations[i];
                let to = &line.stations[i + 1];
                if from == to {
                    continue;
                }
                let (Some(&na), Some(&nb)) = (
                    platforms.get(&(from.clone(), line.id.clone())),
                    platforms.get(&(to.clone(), line.id.clone())),
                ) else {
                    continue;
                };
                graph.add_edge(
                    na,
                    GraphEdge {
                        to: nb,
                        secs: *secs,
                        kind: EdgeKind::Ride,
                    },
                );
            }
        }
    }

    /// In-station change edges between every pair of lines at a station,
    /// unless suppressed by a (S, S) transfer removal.
    fn add_changes(&self, graph: &mut TransitGraph) {
        for station in self.model.stations.keys() {
            if self.overrides.is_transfer_removed(station, station) {
                continue;
            }
            let nodes: Vec<NodeIdx> = graph.platforms_of(station).to_vec();
            for i in 0..nodes.len() {
                for j in (i + 1)..nodes.len() {
                    graph.add_edge_symmetric(
                        nodes[i],
                        nodes[j],
                        self.config.change_penalty_secs,
                        EdgeKind::Change,
                    );
                }
            }
        }
    }

    /// Out-of-station interchange edges: the map's station links plus
    /// manual additions, minus removals. Returns the linked pair set so
    /// wild generation can skip pairs already walkable.
    fn add_transfers(&self, graph: &mut TransitGraph) -> HashSet<(StationId, StationId)> {
        let mut pairs: BTreeSet<(StationId, StationId)> = BTreeSet::new();
        for station in self.model.stations.values() {
            for other in &station.connections {
                pairs.insert(ordered(&station.id, other));
            }
        }
        for station in self.model.stations.keys() {
            for other in self.overrides.transfer_additions_of(station) {
                pairs.insert(ordered(station, other));
            }
        }

        let mut linked = HashSet::new();
        for (a, b) in pairs {
            if a == b || self.overrides.is_transfer_removed(&a, &b) {
                continue;
            }
            let Some(distance) = self.walk_distance(&a, &b, "interchange") else {
                continue;
            };
            let secs = distance / self.config.transfer_walk_speed;
            self.connect_stations(graph, &a, &b, secs, EdgeKind::Transfer { distance });
            linked.insert((a.clone(), b.clone()));
            linked.insert((b, a));
        }
        linked
    }

    /// Wild-transfer edges: every in-range station pair plus manual
    /// additions (any distance), minus removals and pairs already linked
    /// by an interchange.
    fn add_wilds(&self, graph: &mut TransitGraph, linked: &HashSet<(StationId, StationId)>) {
        let max_sq = self.config.max_wild_distance * self.config.max_wild_distance;

        let mut pairs: BTreeSet<(StationId, StationId)> = BTreeSet::new();
        let in_graph: Vec<&StationId> = self
            .model
            .stations
            .keys()
            .filter(|s| graph.contains_station(s))
            .collect();
        for (i, a) in in_graph.iter().enumerate() {
            let Some(pa) = self.model.stations[*a].position else {
                continue;
            };
            for b in &in_graph[i + 1..] {
                let Some(pb) = self.model.stations[*b].position else {
                    continue;
                };
                if pa.distance_squared(&pb) <= max_sq {
                    pairs.insert(ordered(a, b));
                }
            }
        }
        for station in self.model.stations.keys() {
            for other in self.overrides.wild_additions_of(station) {
                pairs.insert(ordered(station, other));
            }
        }

        for (a, b) in pairs {
            if a == b
                || self.overrides.is_wild_removed(&a, &b)
                || linked.contains(&(a.clone(), b.clone()))
            {
                continue;
            }
            let Some(distance) = self.walk_distance(&a, &b, "wild transfer") else {
                continue;
            };
            let secs = distance / self.config.wild_walk_speed;
            self.connect_stations(graph, &a, &b, secs, EdgeKind::Wild { distance });
        }
    }

    /// Distance between two stations, provided both are in the graph and
    /// both have placed positions. Manual links to stations that were
    /// filtered out or never placed are skipped, not fatal: the names were
    /// validated at override resolution, the stations just aren't routable
    /// in this snapshot.
    fn walk_distance(&self, a: &StationId, b: &StationId, what: &str) -> Option<f64> {
        let pa = self.model.stations.get(a).and_then(|s| s.position);
        let pb = self.model.stations.get(b).and_then(|s| s.position);
        match (pa, pb) {
            (Some(pa), Some(pb)) => Some(pa.distance(&pb)),
            _ => {
                tracing::warn!(from = %a, to = %b, "{what} skipped: station has no position");
                None
            }
        }
    }

    /// Connect every platform of `a` to every platform of `b`, both ways.
    fn connect_stations(
        &self,
        graph: &mut TransitGraph,
        a: &StationId,
        b: &StationId,
        secs: f64,
        kind: EdgeKind,
    ) {
        let from: Vec<NodeIdx> = graph.platforms_of(a).to_vec();
        let to: Vec<NodeIdx> = graph.platforms_of(b).to_vec();
        for &na in &from {
            for &nb in &to {
                graph.add_edge_symmetric(na, nb, secs, kind.clone());
            }
        }
    }

    /// Report stations unreachable from the rest of the network. Not
    /// fatal: an under-construction branch is normal.
    fn warn_isolated(&self, graph: &TransitGraph) {
        if graph.node_count() == 0 {
            return;
        }

        let mut seen = vec![false; graph.node_count()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        while let Some(n) = queue.pop_front() {
            for edge in graph.edges_from(n) {
                if !seen[edge.to] {
                    seen[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        let unreachable: Vec<&StationId> = graph
            .stations()
            .filter(|s| graph.platforms_of(s).iter().all(|&n| !seen[n]))
            .collect();
        if !unreachable.is_empty() {
            tracing::warn!(
                count = unreachable.len(),
                "stations unreachable from {}: {}",
                self.model.station_display_name(&graph.node(0).station),
                unreachable
                    .iter()
                    .map(|s| self.model.station_display_name(s))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
}

fn ordered(a: &StationId, b: &StationId) -> (StationId, StationId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
