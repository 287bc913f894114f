//! Conversion from wire types to the raw network model.
//!
//! Validation lives here: a route referencing an unknown station id is
//! malformed data and fails the whole document, while recoverable oddities
//! (unknown connection ids, timing lists that don't line up) are repaired
//! or dropped with a warning, matching how the upstream map behaves in
//! practice.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::domain::{BlockPos, Line, LineId, LineKind, Station, StationId};

use super::error::ParseError;
use super::model::RawNetworkModel;
use super::types::{MapData, RouteDto};

/// Convert a deserialized map document into the network model.
pub fn convert(data: MapData, fetched_at: DateTime<Utc>) -> Result<RawNetworkModel, ParseError> {
    if data.stations.is_empty() {
        return Err(ParseError::NoStations);
    }

    let known_ids: HashSet<&str> = data.stations.iter().map(|s| s.id.as_str()).collect();

    // A station's position is the mean of its placed platform positions
    // across all routes; stations no route stops at have no position.
    let mut platform_positions: HashMap<&str, Vec<(f64, f64)>> = HashMap::new();
    for route in &data.routes {
        for stop in &route.stations {
            if !known_ids.contains(stop.id.as_str()) {
                return Err(ParseError::UnknownStationRef {
                    route: route.name.clone(),
                    station: stop.id.clone(),
                });
            }
            platform_positions
                .entry(stop.id.as_str())
                .or_default()
                .push((stop.x, stop.z));
        }
    }

    let mut stations = BTreeMap::new();
    for dto in &data.stations {
        let position = platform_positions.get(dto.id.as_str()).map(|ps| {
            let n = ps.len() as f64;
            let x = ps.iter().map(|p| p.0).sum::<f64>() / n;
            let z = ps.iter().map(|p| p.1).sum::<f64>() / n;
            BlockPos::new(x, z)
        });

        let connections = dto
            .connections
            .iter()
            .filter(|c| {
                let known = known_ids.contains(c.as_str());
                if !known {
                    tracing::warn!(
                        station = %dto.id,
                        connection = %c,
                        "dropping interchange link to unknown station"
                    );
                }
                known
            })
            .map(|c| StationId::new(c.clone()))
            .collect();

        stations.insert(
            StationId::new(dto.id.clone()),
            Station {
                id: StationId::new(dto.id.clone()),
                name: dto.name.clone(),
                position,
                connections,
            },
        );
    }

    let lines = data
        .routes
        .iter()
        .filter_map(convert_route)
        .collect::<Vec<_>>();

    Ok(RawNetworkModel {
        stations,
        lines,
        fetched_at,
        version: RawNetworkModel::version_for(fetched_at),
    })
}

/// Convert one route, computing per-segment seconds.
///
/// Durations arrive in milliseconds per consecutive pair. A list longer
/// than the station count supports is truncated; shorter (but non-empty)
/// means the map is mid-edit and the route is dropped for this refresh.
/// Zero or absent entries are approximated from platform distance at the
/// kind's average speed, floored at 0.01 s so every segment has positive
/// cost.
fn convert_route(route: &RouteDto) -> Option<Line> {
    let kind = LineKind::from_api(&route.kind);
    let segments = route.stations.len().saturating_sub(1);

    let mut durations: Vec<f64> = route.durations.iter().map(|ms| ms / 1000.0).collect();
    durations.truncate(segments);
    if !durations.is_empty() && durations.len() < segments {
        tracing::warn!(
            route = %route.name,
            expected = segments,
            got = durations.len(),
            "route dropped: timing list shorter than its station sequence"
        );
        return None;
    }

    let mut segment_secs = Vec::with_capacity(segments);
    for i in 0..segments {
        let given = durations.get(i).copied().unwrap_or(0.0);
        let secs = if given > 0.0 {
            given
        } else {
            let a = &route.stations[i];
            let b = &route.stations[i + 1];
            let dist = BlockPos::new(a.x, a.z).distance(&BlockPos::new(b.x, b.z));
            let approx = dist / kind.average_speed();
            if approx > 0.0 { approx } else { 0.01 }
        };
        segment_secs.push(secs);
    }

    Some(Line {
        id: LineId::new(route.id.clone()),
        name: route.name.clone(),
        number: route.number.clone(),
        kind,
        color: route.color,
        stations: route
            .stations
            .iter()
            .map(|s| StationId::new(s.id.clone()))
            .collect(),
        segment_secs,
    })
}
