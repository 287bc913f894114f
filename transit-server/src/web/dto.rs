//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, LegKind, RouteError, StationId};
use crate::snapshot::NetworkSnapshot;

/// Request to find a route.
#[derive(Debug, Deserialize)]
pub struct FindRouteRequest {
    /// Origin station name or alias
    pub from: String,

    /// Destination station name or alias
    pub to: String,

    /// Optional travel-time ceiling in seconds
    #[serde(default)]
    pub max_cost_secs: Option<f64>,
}

/// One leg of a returned route.
#[derive(Debug, Serialize)]
pub struct LegView {
    /// "ride", "change", "transfer" or "walk"
    pub kind: &'static str,

    pub from: String,
    pub to: String,

    /// Line to board, for ride and change legs
    pub line: Option<String>,

    /// Line color as "#rrggbb", for ride and change legs
    pub color: Option<String>,

    /// Walking distance in blocks, for transfer and walk legs
    pub distance_blocks: Option<f64>,

    pub secs: f64,
}

/// A computed route.
#[derive(Debug, Serialize)]
pub struct FindRouteResponse {
    pub origin: String,
    pub destination: String,
    pub total_secs: f64,
    pub transfers: usize,
    pub wild_walks: usize,
    pub legs: Vec<LegView>,

    /// True when the latest refresh failed and this answer comes from the
    /// last good snapshot.
    pub stale: bool,

    pub data_version: String,
}

impl FindRouteResponse {
    /// Render an itinerary against the snapshot it was computed from.
    pub fn build(
        snapshot: &NetworkSnapshot,
        stale: bool,
        origin: &StationId,
        destination: &StationId,
        itinerary: &Itinerary,
    ) -> Self {
        let model = &snapshot.model;
        let line_view = |id| {
            let line = model.line(id);
            (
                Some(line.map(|l| l.display_name()).unwrap_or_else(|| id.to_string())),
                line.map(|l| l.color_hex()),
            )
        };

        let legs = itinerary
            .legs()
            .iter()
            .map(|leg| {
                let (kind, line, color, distance_blocks) = match &leg.kind {
                    LegKind::Ride { line } => {
                        let (line, color) = line_view(line);
                        ("ride", line, color, None)
                    }
                    LegKind::Change { to_line, .. } => {
                        let (line, color) = line_view(to_line);
                        ("change", line, color, None)
                    }
                    LegKind::Transfer { distance } => ("transfer", None, None, Some(*distance)),
                    LegKind::Wild { distance } => ("walk", None, None, Some(*distance)),
                };
                LegView {
                    kind,
                    from: model.station_display_name(&leg.from),
                    to: model.station_display_name(&leg.to),
                    line,
                    color,
                    distance_blocks,
                    secs: leg.secs,
                }
            })
            .collect();

        Self {
            origin: model.station_display_name(origin),
            destination: model.station_display_name(destination),
            total_secs: itinerary.total_secs(),
            transfers: itinerary.transfer_count(),
            wild_walks: itinerary.wild_count(),
            legs,
            stale,
            data_version: model.version.clone(),
        }
    }
}

/// A station in the listing.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,

    /// False when the station is excluded from the current graph
    /// (no surviving line serves it).
    pub routable: bool,
}

/// Response for the station listing.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationView>,
    pub data_version: String,
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub error: String,
}

/// Web-layer errors.
#[derive(Debug)]
pub enum AppError {
    Route(RouteError),
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        AppError::Route(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, error) = match self {
            AppError::Route(err) => {
                let (status, kind) = match &err {
                    RouteError::UnknownStation(_) => (StatusCode::NOT_FOUND, "unknown_station"),
                    RouteError::NoRoute => (StatusCode::NOT_FOUND, "no_route"),
                    RouteError::NoRouteWithinLimit { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "no_route_within_limit")
                    }
                    RouteError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                };
                (status, kind, err.to_string())
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        };

        (status, Json(ErrorBody { kind, error })).into_response()
    }
}
