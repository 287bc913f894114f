//! Wire types for the map API.
//!
//! Mirrors the `stations-and-routes` document shape. Only the fields the
//! route finder consumes are declared; everything else is ignored.

use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct MapResponse {
    pub data: MapData,
}

/// The network description payload.
#[derive(Debug, Deserialize)]
pub struct MapData {
    pub stations: Vec<StationDto>,
    pub routes: Vec<RouteDto>,
}

/// A station record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,

    /// Ids of stations linked as out-of-station interchanges.
    #[serde(default)]
    pub connections: Vec<String>,
}

/// A route record: one direction of one line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub number: String,

    /// Vehicle kind, e.g. `"train_normal"`.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub color: u32,

    /// Travel milliseconds per consecutive station pair. Entries of zero
    /// mean the map has no timing data for that segment.
    #[serde(default)]
    pub durations: Vec<f64>,

    /// Platform stops in route order.
    #[serde(default)]
    pub stations: Vec<RouteStopDto>,
}

/// A platform stop within a route, with its own placed position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopDto {
    pub id: String,

    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub z: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_map_document() {
        let json = r#"{
            "data": {
                "stations": [
                    {"id": "1", "name": "中央站|Central", "connections": ["2"]},
                    {"id": "2", "name": "Harbour"}
                ],
                "routes": [
                    {
                        "id": "r1",
                        "name": "干线|Main Line",
                        "number": "1",
                        "type": "train_normal",
                        "color": 16711680,
                        "circularState": "NONE",
                        "durations": [30000.0],
                        "stations": [
                            {"id": "1", "x": 0.0, "y": 64.0, "z": 0.0, "dwellTime": 1000.0},
                            {"id": "2", "x": 400.0, "y": 64.0, "z": 0.0, "dwellTime": 1000.0}
                        ]
                    }
                ]
            }
        }"#;

        let parsed: MapResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.stations.len(), 2);
        assert_eq!(parsed.data.stations[0].connections, vec!["2".to_string()]);
        assert!(parsed.data.stations[1].connections.is_empty());

        let route = &parsed.data.routes[0];
        assert_eq!(route.kind, "train_normal");
        assert_eq!(route.durations, vec![30000.0]);
        assert_eq!(route.stations[1].x, 400.0);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "data": {
                "stations": [{"id": "1", "name": "Solo"}],
                "routes": [{"id": "r1", "name": "Ghost"}]
            }
        }"#;

        let parsed: MapResponse = serde_json::from_str(json).unwrap();
        let route = &parsed.data.routes[0];
        assert!(route.durations.is_empty());
        assert!(route.stations.is_empty());
        assert_eq!(route.number, "");
    }
}
