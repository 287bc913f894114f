//! Domain types for the transit route finder.
//!
//! Value types shared across the map, graph, and planner layers. All types
//! validate their invariants at construction time, so downstream code can
//! trust any value it receives.

mod error;
mod itinerary;
mod line;
mod position;
mod station;

pub use error::RouteError;
pub use itinerary::{Itinerary, ItineraryError, Leg, LegKind};
pub use line::{Line, LineId, LineKind};
pub use position::BlockPos;
pub use station::{Station, StationId};
