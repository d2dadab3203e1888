//! Data model for road routing
//!
//! Contains coordinate types for both map spaces, node identity
//! and the road graph with its persisted adjacency form.

pub mod node_id;
pub mod path;
pub mod point;
pub mod roads;

pub use node_id::{NODE_ID_SCALE, NodeId};
pub use path::{PathEdge, PathResult};
pub use point::{DisplayPoint, VectorPoint};
pub use roads::{AdjacencyDocument, Neighbor, RoadEdge, RoadGraph, RoadNetwork, RoadNode};
