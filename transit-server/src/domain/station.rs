//! Station identity and records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::BlockPos;

/// Opaque upstream identifier for a station.
///
/// The map API assigns these; they are stable across refreshes of the same
/// world but carry no meaning beyond identity. All user-facing lookup goes
/// through names and aliases, never raw ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A station as described by the upstream map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,

    /// Raw display name, possibly multilingual (`"中文|English"`).
    pub name: String,

    /// Mean position of the station's platforms. `None` when the map has
    /// no placed platform for the station; such stations cannot take part
    /// in distance-priced transfers.
    pub position: Option<BlockPos>,

    /// Stations the map links as out-of-station interchanges.
    pub connections: Vec<StationId>,
}

impl Station {
    /// Name with the multilingual separator flattened, for display.
    pub fn display_name(&self) -> String {
        self.name.replace('|', " ")
    }
}
