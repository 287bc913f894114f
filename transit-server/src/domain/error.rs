//! Query-level errors.
//!
//! Every variant here is recoverable and user-facing; internal fetch and
//! build failures never surface through this type (the snapshot layer
//! degrades to the last good snapshot instead).

/// Errors a route query can return to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The origin or destination name matched no station or alias.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Origin and destination are in disconnected components.
    #[error("no route exists between these stations")]
    NoRoute,

    /// Every route exceeds the travel-time ceiling.
    #[error("no route within {limit_secs} seconds")]
    NoRouteWithinLimit { limit_secs: f64 },

    /// The search exceeded its wall-clock budget.
    #[error("route search timed out")]
    Timeout,
}
