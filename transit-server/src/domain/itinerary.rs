//! Computed itineraries.

use serde::{Deserialize, Serialize};

use super::line::LineId;
use super::station::StationId;

/// How a leg is traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegKind {
    /// Ride a line between two stations.
    Ride { line: LineId },

    /// Change lines inside one station (`from == to`).
    Change { from_line: LineId, to_line: LineId },

    /// Walk between two linked stations (out-of-station interchange).
    Transfer { distance: f64 },

    /// Walk cross-terrain between two unlinked stations.
    Wild { distance: f64 },
}

/// One traversed edge of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub from: StationId,
    pub to: StationId,
    pub kind: LegKind,
    pub secs: f64,
}

impl Leg {
    /// Whether this leg counts as a transfer for tie-breaking.
    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, LegKind::Change { .. } | LegKind::Transfer { .. })
    }

    /// Whether this leg is a wild (cross-terrain) walk.
    pub fn is_wild(&self) -> bool {
        matches!(self.kind, LegKind::Wild { .. })
    }
}

/// Error building an itinerary from legs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// Consecutive legs do not share a station.
    #[error("legs {0} and {1} do not connect")]
    Disjoint(usize, usize),
}

/// An ordered sequence of legs from origin to destination.
///
/// Owned by the query that produced it; never stored in the snapshot.
/// The empty itinerary is the answer to a query whose origin and
/// destination resolve to the same station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Itinerary {
    legs: Vec<Leg>,
}

impl Itinerary {
    /// The trivial zero-leg, zero-cost itinerary.
    pub fn empty() -> Self {
        Self { legs: Vec::new() }
    }

    /// Build an itinerary, checking that consecutive legs connect.
    pub fn new(legs: Vec<Leg>) -> Result<Self, ItineraryError> {
        for i in 1..legs.len() {
            if legs[i - 1].to != legs[i].from {
                return Err(ItineraryError::Disjoint(i - 1, i));
            }
        }
        Ok(Self { legs })
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Total travel seconds: exactly the sum of the legs, nothing hidden.
    pub fn total_secs(&self) -> f64 {
        self.legs.iter().map(|l| l.secs).sum()
    }

    /// Number of transfer legs (in-station changes and station-to-station
    /// interchange walks).
    pub fn transfer_count(&self) -> usize {
        self.legs.iter().filter(|l| l.is_transfer()).count()
    }

    /// Number of wild-walk legs.
    pub fn wild_count(&self) -> usize {
        self.legs.iter().filter(|l| l.is_wild()).count()
    }

    /// Origin station, if any leg exists.
    pub fn origin(&self) -> Option<&StationId> {
        self.legs.first().map(|l| &l.from)
    }

    /// Destination station, if any leg exists.
    pub fn destination(&self) -> Option<&StationId> {
        self.legs.last().map(|l| &l.to)
    }
}
