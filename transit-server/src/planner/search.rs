//! Shortest-route search.
//!
//! Dijkstra over platform nodes. Edge costs are non-negative by
//! construction, so a single priority-queue pass suffices; the queue is
//! ordered lexicographically by (cost, transfer count, wild count) so that
//! among equal-cost routes the one with fewer transfers wins, and among
//! those the one with fewer wild walks.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::domain::{Itinerary, Leg, LegKind, RouteError, StationId};
use crate::graph::{EdgeKind, GraphEdge, NodeIdx, TransitGraph};

use super::config::SearchOptions;

/// Heap entry. `Ord` is flipped so `BinaryHeap` pops the smallest
/// (cost, transfers, wilds) first.
#[derive(Clone, Copy)]
struct State {
    cost: f64,
    transfers: u32,
    wilds: u32,
    node: NodeIdx,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.transfers.cmp(&self.transfers))
            .then_with(|| other.wilds.cmp(&self.wilds))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Best label found for a node, with the edge that produced it.
#[derive(Clone)]
struct Label {
    cost: f64,
    transfers: u32,
    wilds: u32,
    prev: Option<(NodeIdx, GraphEdge)>,
}

fn lex_less(a: (f64, u32, u32), b: (f64, u32, u32)) -> bool {
    match a.0.total_cmp(&b.0) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => (a.1, a.2) < (b.1, b.2),
    }
}

/// Find the best route between two stations.
///
/// Multi-source: the search starts from every platform of the origin at
/// cost zero and settles on the first destination platform popped. The
/// graph is read-only; concurrent searches share it freely.
pub fn search(
    graph: &TransitGraph,
    origin: &StationId,
    destination: &StationId,
    options: &SearchOptions,
) -> Result<Itinerary, RouteError> {
    if origin == destination {
        return Ok(Itinerary::empty());
    }
    if !graph.contains_station(origin) || !graph.contains_station(destination) {
        return Err(RouteError::NoRoute);
    }

    let started = Instant::now();
    let mut labels: Vec<Option<Label>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::new();

    for &node in graph.platforms_of(origin) {
        labels[node] = Some(Label {
            cost: 0.0,
            transfers: 0,
            wilds: 0,
            prev: None,
        });
        heap.push(State {
            cost: 0.0,
            transfers: 0,
            wilds: 0,
            node,
        });
    }

    let mut bound_exceeded = false;
    while let Some(state) = heap.pop() {
        if let Some(timeout) = options.timeout {
            if started.elapsed() > timeout {
                return Err(RouteError::Timeout);
            }
        }

        // The heap pops in nondecreasing cost order, so once the best open
        // node is over the ceiling nothing reachable can come back under it.
        if let Some(max) = options.max_cost_secs {
            if state.cost > max {
                bound_exceeded = true;
                break;
            }
        }

        // Skip superseded heap entries.
        let Some(label) = &labels[state.node] else {
            continue;
        };
        if (state.cost, state.transfers, state.wilds)
            != (label.cost, label.transfers, label.wilds)
        {
            continue;
        }

        if &graph.node(state.node).station == destination {
            return Ok(reconstruct(graph, &labels, state.node));
        }

        for edge in graph.edges_from(state.node) {
            let cost = state.cost + edge.secs;
            let transfers = state.transfers + u32::from(edge.kind.is_transfer());
            let wilds = state.wilds + u32::from(edge.kind.is_wild());

            let improves = match &labels[edge.to] {
                None => true,
                Some(l) => lex_less((cost, transfers, wilds), (l.cost, l.transfers, l.wilds)),
            };
            if improves {
                labels[edge.to] = Some(Label {
                    cost,
                    transfers,
                    wilds,
                    prev: Some((state.node, edge.clone())),
                });
                heap.push(State {
                    cost,
                    transfers,
                    wilds,
                    node: edge.to,
                });
            }
        }
    }

    if bound_exceeded {
        Err(RouteError::NoRouteWithinLimit {
            limit_secs: options.max_cost_secs.unwrap_or(f64::INFINITY),
        })
    } else {
        Err(RouteError::NoRoute)
    }
}

/// Walk the predecessor chain back from the settled destination platform.
fn reconstruct(graph: &TransitGraph, labels: &[Option<Label>], settled: NodeIdx) -> Itinerary {
    let mut legs = Vec::new();
    let mut node = settled;

    while let Some((prev, edge)) = labels[node].as_ref().and_then(|l| l.prev.as_ref()) {
        let from = graph.node(*prev);
        let to = graph.node(edge.to);
        let kind = match &edge.kind {
            EdgeKind::Ride => LegKind::Ride {
                line: from.line.clone(),
            },
            EdgeKind::Change => LegKind::Change {
                from_line: from.line.clone(),
                to_line: to.line.clone(),
            },
            EdgeKind::Transfer { distance } => LegKind::Transfer {
                distance: *distance,
            },
            EdgeKind::Wild { distance } => LegKind::Wild {
                distance: *distance,
            },
        };
        legs.push(Leg {
            from: from.station.clone(),
            to: to.station.clone(),
            kind,
            secs: edge.secs,
        });
        node = *prev;
    }

    legs.reverse();
    Itinerary::new(legs).expect("predecessor chain yields contiguous legs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineId;

    fn sid(s: &str) -> StationId {
        StationId::new(s)
    }

    fn lid(s: &str) -> LineId {
        LineId::new(s)
    }

    /// A small interchange network: A-B-C on line 1 with segment costs
    /// 5 and 5; B-D on line 2 with cost 3; change penalty 2.
    fn interchange_graph(change_penalty: f64) -> TransitGraph {
        let mut g = TransitGraph::new();
        let a1 = g.add_platform(sid("A"), lid("l1"));
        let b1 = g.add_platform(sid("B"), lid("l1"));
        let c1 = g.add_platform(sid("C"), lid("l1"));
        let b2 = g.add_platform(sid("B"), lid("l2"));
        let d2 = g.add_platform(sid("D"), lid("l2"));

        let ride = |to, secs| GraphEdge {
            to,
            secs,
            kind: EdgeKind::Ride,
        };
        g.add_edge(a1, ride(b1, 5.0));
        g.add_edge(b1, ride(c1, 5.0));
        g.add_edge(b2, ride(d2, 3.0));
        g.add_edge_symmetric(b1, b2, change_penalty, EdgeKind::Change);
        g
    }

    #[test]
    fn same_station_is_trivial_route() {
        let g = interchange_graph(2.0);
        let it = search(&g, &sid("A"), &sid("A"), &SearchOptions::default()).unwrap();
        assert!(it.is_empty());
        assert_eq!(it.total_secs(), 0.0);
    }

    #[test]
    fn route_via_interchange_costs_ten() {
        let g = interchange_graph(2.0);
        let it = search(&g, &sid("A"), &sid("D"), &SearchOptions::default()).unwrap();

        assert_eq!(it.total_secs(), 10.0);
        assert_eq!(it.legs().len(), 3);
        assert_eq!(it.transfer_count(), 1);
        assert!(matches!(it.legs()[1].kind, LegKind::Change { .. }));
    }

    #[test]
    fn total_equals_sum_of_legs() {
        let g = interchange_graph(2.0);
        let it = search(&g, &sid("A"), &sid("D"), &SearchOptions::default()).unwrap();
        let sum: f64 = it.legs().iter().map(|l| l.secs).sum();
        assert_eq!(it.total_secs(), sum);
    }

    #[test]
    fn wild_pair_returns_single_wild_leg() {
        // E and F, 200 blocks apart, rail-disconnected.
        let mut g = TransitGraph::new();
        let e = g.add_platform(sid("E"), lid("l1"));
        let f = g.add_platform(sid("F"), lid("l2"));
        g.add_edge_symmetric(e, f, 200.0 / 2.25, EdgeKind::Wild { distance: 200.0 });

        let it = search(&g, &sid("E"), &sid("F"), &SearchOptions::default()).unwrap();
        assert_eq!(it.legs().len(), 1);
        assert!(matches!(it.legs()[0].kind, LegKind::Wild { distance } if distance == 200.0));
        assert_eq!(it.wild_count(), 1);
    }

    #[test]
    fn max_cost_below_route_is_limit_error() {
        let g = interchange_graph(2.0);
        let options = SearchOptions::default().with_max_cost(9.0);
        let err = search(&g, &sid("A"), &sid("D"), &options).unwrap_err();
        assert_eq!(err, RouteError::NoRouteWithinLimit { limit_secs: 9.0 });
    }

    #[test]
    fn max_cost_equal_to_route_is_accepted() {
        let g = interchange_graph(2.0);
        let options = SearchOptions::default().with_max_cost(10.0);
        let it = search(&g, &sid("A"), &sid("D"), &options).unwrap();
        assert!(it.total_secs() <= 10.0);
    }

    #[test]
    fn disconnected_stations_have_no_route() {
        let mut g = interchange_graph(2.0);
        g.add_platform(sid("Z"), lid("l9"));
        let err = search(&g, &sid("A"), &sid("Z"), &SearchOptions::default()).unwrap_err();
        assert_eq!(err, RouteError::NoRoute);
    }

    #[test]
    fn absent_station_has_no_route() {
        let g = interchange_graph(2.0);
        let err = search(&g, &sid("A"), &sid("nowhere"), &SearchOptions::default()).unwrap_err();
        assert_eq!(err, RouteError::NoRoute);
    }

    #[test]
    fn equal_cost_prefers_fewer_transfers() {
        // Two ways from A to B at cost 10: a direct ride, and a zero-cost
        // change followed by a ride. The direct ride must win.
        let mut g = TransitGraph::new();
        let a1 = g.add_platform(sid("A"), lid("l1"));
        let a2 = g.add_platform(sid("A"), lid("l2"));
        let b1 = g.add_platform(sid("B"), lid("l1"));
        let b2 = g.add_platform(sid("B"), lid("l2"));

        g.add_edge(
            a1,
            GraphEdge {
                to: b1,
                secs: 10.0,
                kind: EdgeKind::Ride,
            },
        );
        g.add_edge_symmetric(a1, a2, 0.0, EdgeKind::Change);
        g.add_edge(
            a2,
            GraphEdge {
                to: b2,
                secs: 10.0,
                kind: EdgeKind::Ride,
            },
        );

        let it = search(&g, &sid("A"), &sid("B"), &SearchOptions::default()).unwrap();
        assert_eq!(it.total_secs(), 10.0);
        assert_eq!(it.transfer_count(), 0);
        assert_eq!(it.legs().len(), 1);
    }

    #[test]
    fn equal_cost_prefers_fewer_wild_walks() {
        // Two single-leg ways from A to B at cost 50: a ride and a wild
        // walk. The ride must win.
        let mut g = TransitGraph::new();
        let a = g.add_platform(sid("A"), lid("l1"));
        let b = g.add_platform(sid("B"), lid("l1"));
        g.add_edge(
            a,
            GraphEdge {
                to: b,
                secs: 50.0,
                kind: EdgeKind::Wild { distance: 112.5 },
            },
        );
        g.add_edge(
            a,
            GraphEdge {
                to: b,
                secs: 50.0,
                kind: EdgeKind::Ride,
            },
        );

        let it = search(&g, &sid("A"), &sid("B"), &SearchOptions::default()).unwrap();
        assert_eq!(it.wild_count(), 0);
        assert!(matches!(it.legs()[0].kind, LegKind::Ride { .. }));
    }

    #[test]
    fn zero_timeout_aborts() {
        let g = interchange_graph(2.0);
        let options = SearchOptions::default().with_timeout(std::time::Duration::ZERO);
        let err = search(&g, &sid("A"), &sid("D"), &options).unwrap_err();
        assert_eq!(err, RouteError::Timeout);
    }

    #[test]
    fn settles_destination_before_exploring_rest() {
        // A long tail behind the destination must not be explored into an
        // answer; the first settled destination platform wins.
        let mut g = TransitGraph::new();
        let a = g.add_platform(sid("A"), lid("l1"));
        let b = g.add_platform(sid("B"), lid("l1"));
        let c = g.add_platform(sid("C"), lid("l1"));
        g.add_edge(
            a,
            GraphEdge {
                to: b,
                secs: 5.0,
                kind: EdgeKind::Ride,
            },
        );
        g.add_edge(
            b,
            GraphEdge {
                to: c,
                secs: 5.0,
                kind: EdgeKind::Ride,
            },
        );

        let it = search(&g, &sid("A"), &sid("B"), &SearchOptions::default()).unwrap();
        assert_eq!(it.total_secs(), 5.0);
        assert_eq!(it.destination().unwrap(), &sid("B"));
    }
}
