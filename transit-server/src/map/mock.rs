//! Mock map source for development and tests without a live map.

use chrono::{DateTime, Utc};

use crate::domain::{BlockPos, Line, LineId, LineKind, Station, StationId};

use super::client::MapSource;
use super::error::MapError;
use super::model::RawNetworkModel;

/// A map source that serves a fixed model, or fails every fetch.
///
/// Mimics the real `MapClient` interface so the snapshot layer can be
/// exercised offline, including its degrade-to-stale behavior.
#[derive(Debug, Clone, Default)]
pub struct MockMapSource {
    model: Option<RawNetworkModel>,
}

impl MockMapSource {
    /// Serve the given model on every fetch.
    pub fn new(model: RawNetworkModel) -> Self {
        Self { model: Some(model) }
    }

    /// Serve the built-in sample network.
    pub fn sample() -> Self {
        Self::new(sample_network())
    }

    /// Fail every fetch, as an unreachable map would.
    pub fn failing() -> Self {
        Self { model: None }
    }
}

impl MapSource for MockMapSource {
    fn fetch(&self) -> impl Future<Output = Result<RawNetworkModel, MapError>> + Send {
        let result = match &self.model {
            Some(model) => Ok(model.clone()),
            None => Err(MapError::Api {
                status: 0,
                message: "mock map source configured to fail".to_string(),
            }),
        };
        async move { result }
    }
}

fn fetched_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A small two-line network with an interchange and a walkable pair:
///
/// ```text
///   Main Line:   Central --- Riverside --- Summit
///   Branch:      Riverside --- Quarry
///   (Lakeside sits 200 blocks from Quarry, rail-disconnected)
/// ```
pub fn sample_network() -> RawNetworkModel {
    let station = |id: &str, name: &str, x: f64, z: f64| Station {
        id: StationId::new(id),
        name: name.to_string(),
        position: Some(BlockPos::new(x, z)),
        connections: vec![],
    };

    let stations = [
        station("1", "中央站|Central", 0.0, 0.0),
        station("2", "河畔|Riverside", 1000.0, 0.0),
        station("3", "山顶|Summit", 2000.0, 0.0),
        station("4", "矿场|Quarry", 1000.0, 900.0),
        station("5", "湖边|Lakeside", 1000.0, 1100.0),
    ]
    .into_iter()
    .map(|s| (s.id.clone(), s))
    .collect();

    let line = |id: &str, name: &str, stations: &[&str], secs: &[f64]| Line {
        id: LineId::new(id),
        name: name.to_string(),
        number: String::new(),
        kind: LineKind::TrainNormal,
        color: 0x20_60_a0,
        stations: stations.iter().map(|s| StationId::new(*s)).collect(),
        segment_secs: secs.to_vec(),
    };

    RawNetworkModel {
        stations,
        lines: vec![
            line("r1", "干线|Main Line", &["1", "2", "3"], &[70.0, 70.0]),
            line("r1b", "干线|Main Line", &["3", "2", "1"], &[70.0, 70.0]),
            line("r2", "支线|Branch", &["2", "4"], &[65.0]),
            line("r2b", "支线|Branch", &["4", "2"], &[65.0]),
        ],
        fetched_at: fetched_at(),
        version: RawNetworkModel::version_for(fetched_at()),
    }
}
