//! Road network model

pub mod adjacency;
pub mod components;
pub mod network;

pub use adjacency::{AdjacencyDocument, Neighbor};
pub use components::{RoadEdge, RoadNode};
pub use network::{RoadGraph, RoadNetwork};
