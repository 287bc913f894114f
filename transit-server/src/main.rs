use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use transit_server::cache::CacheConfig;
use transit_server::graph::BuildConfig;
use transit_server::map::{MapClient, MapClientConfig, MapSource};
use transit_server::overrides::OverrideConfig;
use transit_server::planner::SearchOptions;
use transit_server::snapshot::{NetworkSnapshot, SnapshotStore};
use transit_server::web::{AppState, create_router};

/// How often to refresh the map data (10 minutes).
const MAP_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transit_server=info,tower_http=info".into()),
        )
        .init();

    // The online map to read the network from
    let map_url = std::env::var("TRANSIT_MAP_URL")
        .expect("TRANSIT_MAP_URL must be set to the online map's base URL");

    // Optional admin config: aliases, overrides, excluded lines
    let overrides: OverrideConfig = match std::env::var("TRANSIT_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
            serde_json::from_str(&raw).unwrap_or_else(|e| panic!("invalid config {path}: {e}"))
        }
        Err(_) => OverrideConfig::default(),
    };

    let mut build_config = BuildConfig::default();
    if let Ok(blocks) = std::env::var("TRANSIT_MAX_WILD_DISTANCE") {
        build_config.max_wild_distance = blocks
            .parse()
            .expect("TRANSIT_MAX_WILD_DISTANCE must be a number of blocks");
    }

    let mut search = SearchOptions::default();
    if let Ok(secs) = std::env::var("TRANSIT_MAX_COST_SECS") {
        search.max_cost_secs = Some(
            secs.parse()
                .expect("TRANSIT_MAX_COST_SECS must be a number of seconds"),
        );
    }

    // Fetch the initial snapshot (fail fast if the map is unreachable)
    let client =
        MapClient::new(MapClientConfig::new(map_url)).expect("failed to create map client");
    tracing::info!("fetching initial map data...");
    let model = client.fetch().await.expect("initial map fetch failed");
    let snapshot = NetworkSnapshot::build(model, &overrides, &build_config)
        .expect("initial snapshot build failed");
    let store = SnapshotStore::new(snapshot, overrides, build_config);

    // Refresh the snapshot in the background; queries keep reading the
    // last good one while a refresh is in flight or failing.
    let refresh_store = store.clone();
    let refresh_client = client.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAP_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_store.refresh(&refresh_client).await {
                Ok(count) => tracing::info!(stations = count, "refreshed network snapshot"),
                Err(e) => {
                    tracing::warn!(error = %e, "refresh failed; serving stale snapshot")
                }
            }
        }
    });

    let state = AppState::new(store, &CacheConfig::default(), search);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("TRANSIT_LISTEN_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    tracing::info!("transit route finder listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
