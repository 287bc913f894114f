//! Web layer: JSON API over the planner.
//!
//! Presentation (page rendering, route images) lives elsewhere; this
//! layer only resolves, searches, caches, and serializes.

mod dto;
mod routes;
mod state;

pub use dto::{
    AppError, ErrorBody, FindRouteRequest, FindRouteResponse, LegView, StationListResponse,
    StationView,
};
pub use routes::create_router;
pub use state::AppState;
