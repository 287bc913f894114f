//! Administrator overrides.
//!
//! Raw config is keyed by human-readable station and line names; the
//! registry is the validated, id-keyed form consulted during graph
//! construction. Resolution rejects unknown names outright rather than
//! dropping entries, so a typo in the admin config fails the rebuild and
//! the previous snapshot stays in service.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::alias::{AliasResolver, normalize};
use crate::domain::{Line, StationId};

/// Raw override configuration, as an administrator writes it.
///
/// All station references are names (subject to alias resolution); line
/// references are any of the line's name keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideConfig {
    /// Station nickname → station name.
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// Manual out-of-station interchanges: station → linked stations.
    #[serde(default)]
    pub transfer_additions: HashMap<String, Vec<String>>,

    /// Manual wild-transfer links, usable regardless of distance.
    #[serde(default)]
    pub wild_additions: HashMap<String, Vec<String>>,

    /// Station pairs whose transfer edges are suppressed. The self pair
    /// `(S, S)` suppresses in-station line changes at `S`.
    #[serde(default)]
    pub transfer_removals: Vec<(String, String)>,

    /// Station pairs whose wild-transfer edges are suppressed.
    #[serde(default)]
    pub wild_removals: Vec<(String, String)>,

    /// Lines excluded from the graph (unopened or decommissioned).
    #[serde(default)]
    pub ignored_lines: Vec<String>,

    /// Stations excluded from the graph entirely.
    #[serde(default)]
    pub avoid_stations: Vec<String>,
}

/// An override entry referencing a name that resolves to no station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{context} references unknown station {name:?}")]
pub struct OverrideError {
    pub name: String,
    pub context: &'static str,
}

/// Validated, id-keyed override sets, immutable per snapshot.
///
/// Additions are symmetric: an entry from A to B is stored under both
/// stations. Removal pairs are stored in both orders. Duplicate config
/// entries collapse into the sets with no further effect.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    transfer_additions: HashMap<StationId, BTreeSet<StationId>>,
    wild_additions: HashMap<StationId, BTreeSet<StationId>>,
    transfer_removals: HashSet<(StationId, StationId)>,
    wild_removals: HashSet<(StationId, StationId)>,
    ignored_lines: HashSet<String>,
    avoid_stations: HashSet<StationId>,
}

impl OverrideRegistry {
    /// Resolve raw config against the alias table.
    pub fn resolve(
        config: &OverrideConfig,
        aliases: &AliasResolver,
    ) -> Result<Self, OverrideError> {
        let mut registry = OverrideRegistry {
            ignored_lines: config.ignored_lines.iter().map(|x| normalize(x)).collect(),
            ..Default::default()
        };

        for (from, targets) in &config.transfer_additions {
            let from = resolve(aliases, from, "transfer addition")?;
            for target in targets {
                let to = resolve(aliases, target, "transfer addition")?;
                insert_symmetric(&mut registry.transfer_additions, &from, &to);
            }
        }

        for (from, targets) in &config.wild_additions {
            let from = resolve(aliases, from, "wild-transfer addition")?;
            for target in targets {
                let to = resolve(aliases, target, "wild-transfer addition")?;
                insert_symmetric(&mut registry.wild_additions, &from, &to);
            }
        }

        for (a, b) in &config.transfer_removals {
            let a = resolve(aliases, a, "transfer removal")?;
            let b = resolve(aliases, b, "transfer removal")?;
            registry.transfer_removals.insert((a.clone(), b.clone()));
            registry.transfer_removals.insert((b, a));
        }

        for (a, b) in &config.wild_removals {
            let a = resolve(aliases, a, "wild-transfer removal")?;
            let b = resolve(aliases, b, "wild-transfer removal")?;
            registry.wild_removals.insert((a.clone(), b.clone()));
            registry.wild_removals.insert((b, a));
        }

        for name in &config.avoid_stations {
            let id = resolve(aliases, name, "avoided station")?;
            registry.avoid_stations.insert(id);
        }

        Ok(registry)
    }

    /// Stations manually linked to `station` as out-of-station transfers.
    pub fn transfer_additions_of(&self, station: &StationId) -> impl Iterator<Item = &StationId> {
        self.transfer_additions.get(station).into_iter().flatten()
    }

    /// Stations manually linked to `station` as wild transfers.
    pub fn wild_additions_of(&self, station: &StationId) -> impl Iterator<Item = &StationId> {
        self.wild_additions.get(station).into_iter().flatten()
    }

    pub fn is_transfer_removed(&self, a: &StationId, b: &StationId) -> bool {
        self.transfer_removals.contains(&(a.clone(), b.clone()))
    }

    pub fn is_wild_removed(&self, a: &StationId, b: &StationId) -> bool {
        self.wild_removals.contains(&(a.clone(), b.clone()))
    }

    /// Whether any of the line's name keys is in the excluded list.
    pub fn is_line_ignored(&self, line: &Line) -> bool {
        if self.ignored_lines.is_empty() {
            return false;
        }
        line.ignore_keys()
            .iter()
            .any(|key| self.ignored_lines.contains(key))
    }

    pub fn is_station_avoided(&self, station: &StationId) -> bool {
        self.avoid_stations.contains(station)
    }
}

fn resolve(
    aliases: &AliasResolver,
    name: &str,
    context: &'static str,
) -> Result<StationId, OverrideError> {
    aliases.resolve(name).map_err(|e| OverrideError {
        name: e.name,
        context,
    })
}

fn insert_symmetric(
    map: &mut HashMap<StationId, BTreeSet<StationId>>,
    a: &StationId,
    b: &StationId,
) {
    map.entry(a.clone()).or_default().insert(b.clone());
    map.entry(b.clone()).or_default().insert(a.clone());
}
