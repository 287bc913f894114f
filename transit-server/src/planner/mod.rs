//! Route planning: name resolution plus shortest-route search.

mod config;
mod search;

pub use config::SearchOptions;
pub use search::search;

use crate::domain::{Itinerary, RouteError};
use crate::snapshot::NetworkSnapshot;

/// Answer a route query against a snapshot.
///
/// Origin and destination arrive as free-form names; both are resolved
/// through the snapshot's alias table before the graph is consulted.
pub fn find_route(
    snapshot: &NetworkSnapshot,
    origin: &str,
    destination: &str,
    options: &SearchOptions,
) -> Result<Itinerary, RouteError> {
    let origin = snapshot
        .aliases
        .resolve(origin)
        .map_err(|e| RouteError::UnknownStation(e.name))?;
    let destination = snapshot
        .aliases
        .resolve(destination)
        .map_err(|e| RouteError::UnknownStation(e.name))?;

    search(&snapshot.graph, &origin, &destination, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BuildConfig;
    use crate::map::sample_network;
    use crate::overrides::OverrideConfig;

    fn snapshot_with(overrides: OverrideConfig, build: BuildConfig) -> NetworkSnapshot {
        NetworkSnapshot::build(sample_network(), &overrides, &build).unwrap()
    }

    fn snapshot() -> NetworkSnapshot {
        snapshot_with(
            OverrideConfig::default(),
            BuildConfig {
                change_penalty_secs: 30.0,
                enable_wild: false,
                ..Default::default()
            },
        )
    }

    #[test]
    fn resolves_names_and_routes() {
        // Central to Quarry: ride 70, change 30, ride 65.
        let snap = snapshot();
        let it = find_route(&snap, "Central", "Quarry", &SearchOptions::default()).unwrap();
        assert_eq!(it.total_secs(), 165.0);
        assert_eq!(it.transfer_count(), 1);
    }

    #[test]
    fn accepts_native_script_names() {
        let snap = snapshot();
        let it = find_route(&snap, "中央站", "矿场", &SearchOptions::default()).unwrap();
        assert_eq!(it.total_secs(), 165.0);
    }

    #[test]
    fn alias_lookup_applies_to_queries() {
        let snap = snapshot_with(
            OverrideConfig {
                aliases: [("cbd".to_string(), "Central".to_string())]
                    .into_iter()
                    .collect(),
                ..Default::default()
            },
            BuildConfig {
                enable_wild: false,
                ..Default::default()
            },
        );
        let it = find_route(&snap, "CBD", "Summit", &SearchOptions::default()).unwrap();
        assert_eq!(it.total_secs(), 140.0);
    }

    #[test]
    fn unknown_name_is_user_facing_error() {
        let snap = snapshot();
        let err = find_route(&snap, "Atlantis", "Quarry", &SearchOptions::default()).unwrap_err();
        assert_eq!(err, RouteError::UnknownStation("Atlantis".to_string()));
    }

    #[test]
    fn same_station_resolves_to_trivial_route() {
        let snap = snapshot();
        let it = find_route(&snap, "Central", "中央站", &SearchOptions::default()).unwrap();
        assert!(it.is_empty());
    }

    #[test]
    fn station_on_ignored_line_is_unroutable() {
        let snap = snapshot_with(
            OverrideConfig {
                ignored_lines: vec!["Branch".to_string()],
                ..Default::default()
            },
            BuildConfig {
                enable_wild: false,
                ..Default::default()
            },
        );
        // Quarry's only line is ignored: it resolves but no route reaches it.
        let err = find_route(&snap, "Central", "Quarry", &SearchOptions::default()).unwrap_err();
        assert_eq!(err, RouteError::NoRoute);
    }

    #[test]
    fn manual_transfer_never_increases_cost() {
        let base = snapshot();
        let with_link = snapshot_with(
            OverrideConfig {
                transfer_additions: [("Central".to_string(), vec!["Quarry".to_string()])]
                    .into_iter()
                    .collect(),
                ..Default::default()
            },
            BuildConfig {
                change_penalty_secs: 30.0,
                enable_wild: false,
                ..Default::default()
            },
        );

        for (from, to) in [("Central", "Quarry"), ("Central", "Summit"), ("Summit", "Quarry")] {
            let before = find_route(&base, from, to, &SearchOptions::default())
                .unwrap()
                .total_secs();
            let after = find_route(&with_link, from, to, &SearchOptions::default())
                .unwrap()
                .total_secs();
            assert!(after <= before, "{from}->{to}: {after} > {before}");
        }
    }

    #[test]
    fn station_without_lines_stays_unroutable() {
        // Even with wild transfers on, Lakeside has no serving line and
        // therefore no platforms, so it stays unroutable despite being
        // close to Quarry.
        let snap = snapshot_with(OverrideConfig::default(), BuildConfig::default());
        let err = find_route(&snap, "Central", "Lakeside", &SearchOptions::default()).unwrap_err();
        assert_eq!(err, RouteError::NoRoute);
    }
}
