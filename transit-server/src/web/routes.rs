//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::domain::RouteError;
use crate::cache::RouteCache;
use crate::planner::{SearchOptions, find_route};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/find-route", post(handle_find_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station the current snapshot knows, routable or not.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let view = state.store.current().await;
    let snapshot = &view.snapshot;

    let mut stations: Vec<StationView> = snapshot
        .model
        .stations
        .values()
        .map(|s| StationView {
            name: s.display_name(),
            routable: snapshot.graph.contains_station(&s.id),
        })
        .collect();
    stations.sort_by(|a, b| a.name.cmp(&b.name));

    Json(StationListResponse {
        stations,
        data_version: snapshot.model.version.clone(),
    })
}

/// Find the fastest route between two named stations.
async fn handle_find_route(
    State(state): State<AppState>,
    Json(req): Json<FindRouteRequest>,
) -> Result<Json<FindRouteResponse>, AppError> {
    let view = state.store.current().await;
    let snapshot = &view.snapshot;

    // Resolve early so cache keys use canonical ids, not raw spellings.
    let origin = snapshot
        .aliases
        .resolve(&req.from)
        .map_err(|e| RouteError::UnknownStation(e.name))?;
    let destination = snapshot
        .aliases
        .resolve(&req.to)
        .map_err(|e| RouteError::UnknownStation(e.name))?;

    let options = SearchOptions {
        max_cost_secs: req.max_cost_secs.or(state.search.max_cost_secs),
        timeout: state.search.timeout,
    };

    let key = RouteCache::key(
        &origin,
        &destination,
        options.max_cost_secs,
        &snapshot.model.version,
    );
    let itinerary = match state.cache.get(&key).await {
        Some(cached) => cached,
        None => {
            let itinerary = Arc::new(find_route(snapshot, &req.from, &req.to, &options)?);
            state.cache.insert(key, itinerary.clone()).await;
            itinerary
        }
    };

    Ok(Json(FindRouteResponse::build(
        snapshot,
        view.stale,
        &origin,
        &destination,
        &itinerary,
    )))
}
