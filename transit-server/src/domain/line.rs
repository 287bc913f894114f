//! Line identity and records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::station::StationId;

/// Opaque upstream identifier for a line (the map calls them routes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Vehicle kind of a line, as reported by the map.
///
/// Each kind has a default cruising speed used to approximate segment
/// times the map left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    TrainNormal,
    TrainLightRail,
    TrainHighSpeed,
    BoatNormal,
    BoatLightRail,
    BoatHighSpeed,
    CableCarNormal,
    AirplaneNormal,
}

impl LineKind {
    /// Parse the map API's `type` string. Unknown kinds fall back to a
    /// normal train rather than rejecting the whole dataset.
    pub fn from_api(s: &str) -> Self {
        match s {
            "train_normal" => LineKind::TrainNormal,
            "train_light_rail" => LineKind::TrainLightRail,
            "train_high_speed" => LineKind::TrainHighSpeed,
            "boat_normal" => LineKind::BoatNormal,
            "boat_light_rail" => LineKind::BoatLightRail,
            "boat_high_speed" => LineKind::BoatHighSpeed,
            "cable_car_normal" => LineKind::CableCarNormal,
            "airplane_normal" => LineKind::AirplaneNormal,
            _ => LineKind::TrainNormal,
        }
    }

    /// Average vehicle speed in blocks per second.
    pub fn average_speed(&self) -> f64 {
        match self {
            LineKind::TrainNormal => 14.0,
            LineKind::TrainLightRail => 11.0,
            LineKind::TrainHighSpeed => 40.0,
            LineKind::BoatNormal => 10.0,
            LineKind::BoatLightRail => 10.0,
            LineKind::BoatHighSpeed => 13.0,
            LineKind::CableCarNormal => 8.0,
            LineKind::AirplaneNormal => 70.0,
        }
    }

    pub fn is_boat(&self) -> bool {
        matches!(
            self,
            LineKind::BoatNormal | LineKind::BoatLightRail | LineKind::BoatHighSpeed
        )
    }

    pub fn is_high_speed(&self) -> bool {
        matches!(self, LineKind::TrainHighSpeed)
    }

    pub fn is_light_rail(&self) -> bool {
        matches!(self, LineKind::TrainLightRail)
    }
}

/// A line: an ordered run of stations with per-segment travel times.
///
/// Lines are directional; a bidirectional service appears upstream as two
/// separate lines, one per direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,

    /// Raw name, possibly multilingual (`"干线|Main Line||extra"`).
    pub name: String,

    /// Route number, often empty.
    pub number: String,

    pub kind: LineKind,

    /// 24-bit RGB color from the map, for presentation.
    pub color: u32,

    /// Station sequence in route order.
    pub stations: Vec<StationId>,

    /// Travel seconds for each consecutive station pair;
    /// `segment_secs.len() == stations.len() - 1`.
    pub segment_secs: Vec<f64>,
}

impl Line {
    /// Name with multilingual separators flattened, prefixed with the
    /// route number when present.
    pub fn display_name(&self) -> String {
        let flat = self.name.split("||").next().unwrap_or("").replace('|', " ");
        if self.number.trim().is_empty() {
            flat
        } else {
            format!("{} {}", self.number.trim(), flat)
        }
    }

    /// Color as a `#rrggbb` string.
    pub fn color_hex(&self) -> String {
        format!("#{:06x}", self.color & 0xff_ff_ff)
    }

    /// The normalized name keys an administrator may use to refer to this
    /// line in the excluded-lines list: the full raw name, the first `|`
    /// segment, the English segment when present, and each of those with
    /// the route number appended.
    pub fn ignore_keys(&self) -> Vec<String> {
        let n = &self.name;
        let mut names = vec![n.clone()];
        if let Some(first) = n.split('|').next() {
            names.push(first.to_string());
        }

        // "中文|English" or "中文|English||hidden": the second segment is
        // the English name unless the separator was the "||" variant.
        let double = n.contains("||");
        let pipes = n.matches('|').count();
        if (double && pipes > 2) || (!double && pipes > 0) {
            if let Some(eng) = n.split('|').nth(1) {
                if !eng.is_empty() {
                    names.push(eng.to_string());
                }
            }
        }

        let number = self.number.trim();
        if !number.is_empty() {
            let numbered: Vec<String> = names
                .iter()
                .skip(1)
                .map(|x| format!("{x} {number}"))
                .collect();
            names.extend(numbered);
        }

        names
            .into_iter()
            .map(|x| crate::alias::normalize(&x))
            .collect()
    }
}
