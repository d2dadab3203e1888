//! Road network components - nodes and edges

use crate::Distance;
use crate::model::{NodeId, VectorPoint};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Identity derived from the coordinates
    pub id: NodeId,
    /// Node coordinates in vector space
    pub geometry: VectorPoint,
}

/// Road graph edge (straight road segment)
#[derive(Debug, Clone, Copy)]
pub struct RoadEdge {
    /// Segment length in vector-space units
    pub weight: Distance,
}
