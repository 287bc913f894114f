//! Station name normalization and alias resolution.
//!
//! Queries arrive as free-form names ("central", "中央站", a community
//! nickname). Resolution is exact-match over a precomputed table: the
//! configured alias table first, then every station's name variants. The
//! same normalization is applied to the table and to incoming queries.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Station, StationId};

/// Normalize a station or line name for lookup: Unicode lowercase, outer
/// whitespace trimmed, inner whitespace runs collapsed to single spaces.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The lookup keys a raw multilingual station name answers to.
///
/// Upstream names look like `"中央站|Central/Centre"`: `|` separates
/// languages and `/` separates alternates within one language. A query
/// may use the full name, the first segment, the last segment, or the
/// last `/` alternate of the last segment.
pub fn name_variants(name: &str) -> Vec<String> {
    let mut variants = vec![name.to_string()];

    if let Some(first) = name.split('|').next() {
        variants.push(first.to_string());
    }
    if let Some(last) = name.split('|').next_back() {
        variants.push(last.to_string());
        if let Some(alt) = last.split('/').next_back() {
            variants.push(alt.to_string());
        }
    }

    let mut out: Vec<String> = Vec::new();
    for v in variants {
        let v = normalize(&v);
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// A query name that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station: {name}")]
pub struct UnknownStation {
    pub name: String,
}

/// Error building the alias table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// A configured alias points at a name that resolves to no station.
    #[error("alias {alias:?} targets unknown station {target:?}")]
    UnknownTarget { alias: String, target: String },
}

/// Immutable normalized-name → station lookup.
///
/// Built once per snapshot. Configured aliases take precedence over
/// station names; among station name variants, the station with the
/// smallest id wins a collision, which keeps resolution deterministic
/// across rebuilds.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    lookup: HashMap<String, StationId>,
}

impl AliasResolver {
    /// Build the table from station records and the configured alias map
    /// (nickname → station name). Alias targets are resolved against the
    /// station names and rejected if unknown.
    pub fn build(
        stations: &BTreeMap<StationId, Station>,
        aliases: &HashMap<String, String>,
    ) -> Result<Self, AliasError> {
        let mut lookup: HashMap<String, StationId> = HashMap::new();

        for station in stations.values() {
            for variant in name_variants(&station.name) {
                lookup.entry(variant).or_insert_with(|| station.id.clone());
            }
        }

        // Sorted so an (invalid) config with duplicate normalized aliases
        // still resolves the same way on every rebuild.
        let mut pairs: Vec<(&String, &String)> = aliases.iter().collect();
        pairs.sort();
        for (alias, target) in pairs {
            let target_id = lookup
                .get(&normalize(target))
                .cloned()
                .ok_or_else(|| AliasError::UnknownTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                })?;
            lookup.insert(normalize(alias), target_id);
        }

        Ok(Self { lookup })
    }

    /// Resolve a free-form name to a station id.
    pub fn resolve(&self, name: &str) -> Result<StationId, UnknownStation> {
        self.lookup
            .get(&normalize(name))
            .cloned()
            .ok_or_else(|| UnknownStation {
                name: name.to_string(),
            })
    }

    /// Number of distinct lookup keys.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlockPos;

    fn station(id: &str, name: &str) -> (StationId, Station) {
        (
            StationId::new(id),
            Station {
                id: StationId::new(id),
                name: name.to_string(),
                position: Some(BlockPos::new(0.0, 0.0)),
                connections: vec![],
            },
        )
    }

    fn model(entries: &[(&str, &str)]) -> BTreeMap<StationId, Station> {
        entries.iter().map(|(id, name)| station(id, name)).collect()
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Central   Station "), "central station");
        assert_eq!(normalize("中央站"), "中央站");
    }

    #[test]
    fn variants_of_multilingual_name() {
        let v = name_variants("中央站|Central/Centre");
        assert!(v.contains(&"中央站|central/centre".to_string()));
        assert!(v.contains(&"中央站".to_string()));
        assert!(v.contains(&"central/centre".to_string()));
        assert!(v.contains(&"centre".to_string()));
    }

    #[test]
    fn variants_of_plain_name_deduplicate() {
        assert_eq!(name_variants("Harbour"), vec!["harbour".to_string()]);
    }

    #[test]
    fn resolve_by_any_variant() {
        let stations = model(&[("1", "中央站|Central")]);
        let resolver = AliasResolver::build(&stations, &HashMap::new()).unwrap();

        assert_eq!(resolver.resolve("Central").unwrap().as_str(), "1");
        assert_eq!(resolver.resolve("中央站").unwrap().as_str(), "1");
        assert_eq!(resolver.resolve("  central ").unwrap().as_str(), "1");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let stations = model(&[("1", "Central")]);
        let resolver = AliasResolver::build(&stations, &HashMap::new()).unwrap();

        let err = resolver.resolve("atlantis").unwrap_err();
        assert_eq!(err.name, "atlantis");
    }

    #[test]
    fn alias_resolves_to_target_station() {
        let stations = model(&[("1", "中央站|Central"), ("2", "Harbour")]);
        let aliases = HashMap::from([("hq".to_string(), "Central".to_string())]);
        let resolver = AliasResolver::build(&stations, &aliases).unwrap();

        assert_eq!(resolver.resolve("HQ").unwrap().as_str(), "1");
    }

    #[test]
    fn alias_takes_precedence_over_station_name() {
        // "harbour" is both a station name and an alias for Central; the
        // alias wins, matching the lookup order (alias table first).
        let stations = model(&[("1", "Central"), ("2", "Harbour")]);
        let aliases = HashMap::from([("harbour".to_string(), "Central".to_string())]);
        let resolver = AliasResolver::build(&stations, &aliases).unwrap();

        assert_eq!(resolver.resolve("harbour").unwrap().as_str(), "1");
    }

    #[test]
    fn alias_to_unknown_target_rejected() {
        let stations = model(&[("1", "Central")]);
        let aliases = HashMap::from([("x".to_string(), "Atlantis".to_string())]);
        let err = AliasResolver::build(&stations, &aliases).unwrap_err();

        assert_eq!(
            err,
            AliasError::UnknownTarget {
                alias: "x".to_string(),
                target: "Atlantis".to_string(),
            }
        );
    }

    #[test]
    fn name_collision_resolves_to_smallest_id() {
        // Two stations share the English variant "Junction".
        let stations = model(&[("b", "南站|Junction"), ("a", "北站|Junction")]);
        let resolver = AliasResolver::build(&stations, &HashMap::new()).unwrap();

        // BTreeMap iteration order: "a" first.
        assert_eq!(resolver.resolve("Junction").unwrap().as_str(), "a");
        assert_eq!(resolver.resolve("南站").unwrap().as_str(), "b");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalization is idempotent.
        #[test]
        fn normalize_idempotent(s in "\\PC{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Resolving a station's own name twice yields the same id, and a
        /// round trip through the resolved station's name comes back to it.
        #[test]
        fn resolution_idempotent(name in "[a-zA-Z][a-zA-Z ]{0,20}") {
            let stations: BTreeMap<StationId, Station> =
                [("1", name.as_str())].iter().map(|(id, n)| {
                    (StationId::new(*id), Station {
                        id: StationId::new(*id),
                        name: n.to_string(),
                        position: None,
                        connections: vec![],
                    })
                }).collect();
            let resolver = AliasResolver::build(&stations, &HashMap::new()).unwrap();

            let first = resolver.resolve(&name).unwrap();
            let second = resolver.resolve(&name).unwrap();
            prop_assert_eq!(&first, &second);

            let canonical = &stations[&first].name;
            prop_assert_eq!(resolver.resolve(canonical).unwrap(), first);
        }
    }
}
