//! Block-grid positions.

use serde::{Deserialize, Serialize};

/// A position on the world's x/z plane, in blocks.
///
/// Elevation is irrelevant for walking-distance purposes, so only the
/// horizontal plane is kept. Station positions are averaged over the
/// per-line platform positions reported by the map, so coordinates are
/// fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: f64,
    pub z: f64,
}

impl BlockPos {
    /// Create a position from x/z block coordinates.
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Squared Euclidean distance to another position, in blocks².
    ///
    /// Used for range checks without paying for the square root.
    pub fn distance_squared(&self, other: &BlockPos) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Euclidean distance to another position, in blocks.
    pub fn distance(&self, other: &BlockPos) -> f64 {
        self.distance_squared(other).sqrt()
    }
}
