//! Canonical identity of a road graph node.
//!
//! A node is identified by its vector-space coordinates quantised to
//! fixed-precision integers, so equal coordinates always produce equal ids
//! and the id never depends on how a float happened to be formatted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;
use crate::model::VectorPoint;

/// Quantisation step: coordinates are kept to millionths of a vector unit
pub const NODE_ID_SCALE: f64 = 1_000_000.0;

/// Largest magnitude that survives the i64 <-> f64 round trip exactly (2^53)
const MAX_QUANTISED: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    x: i64,
    y: i64,
}

impl NodeId {
    /// Identity of the node at `point`, `None` for non-finite or
    /// out-of-range coordinates
    pub fn try_from_point(point: VectorPoint) -> Option<Self> {
        Some(Self {
            x: quantise(point.x())?,
            y: quantise(point.y())?,
        })
    }

    /// Coordinates this id stands for
    #[allow(clippy::cast_precision_loss)]
    pub fn point(&self) -> VectorPoint {
        VectorPoint::new(self.x as f64 / NODE_ID_SCALE, self.y as f64 / NODE_ID_SCALE)
    }
}

fn quantise(value: f64) -> Option<i64> {
    let scaled = (value * NODE_ID_SCALE).round();
    if scaled.is_finite() && scaled.abs() <= MAX_QUANTISED {
        #[allow(clippy::cast_possible_truncation)]
        Some(scaled as i64)
    } else {
        None
    }
}

// Encoded as a JSON array, e.g. `[1024.5,-12]`
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.point();
        write!(f, "[{},{}]", point.x(), point.y())
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y]: [f64; 2] = serde_json::from_str(s)
            .map_err(|e| Error::InvalidData(format!("Malformed node id '{s}': {e}")))?;

        Self::try_from_point(VectorPoint::new(x, y))
            .ok_or_else(|| Error::InvalidData(format!("Node id '{s}' is out of range")))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
