//! The in-memory raw network model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Line, LineId, Station, StationId};

/// The parsed, validated network description: input to graph construction
/// and the source of truth for names and positions when rendering
/// itineraries.
///
/// Stations are kept in a `BTreeMap` so every traversal of the model is
/// deterministic across rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNetworkModel {
    pub stations: BTreeMap<StationId, Station>,
    pub lines: Vec<Line>,

    /// When the upstream document was fetched.
    pub fetched_at: DateTime<Utc>,

    /// Human-readable data version shown alongside results.
    pub version: String,
}

impl RawNetworkModel {
    /// Version string derived from the fetch time.
    pub fn version_for(fetched_at: DateTime<Utc>) -> String {
        fetched_at.format("%Y%m%d-%H%M").to_string()
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Display name for a station id, falling back to the raw id for
    /// stations that vanished between snapshot and response rendering.
    pub fn station_display_name(&self, id: &StationId) -> String {
        self.stations
            .get(id)
            .map(|s| s.display_name())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_format() {
        let t = DateTime::parse_from_rfc3339("2024-03-15T10:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(RawNetworkModel::version_for(t), "20240315-1005");
    }
}
