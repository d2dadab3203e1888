//! Route queries over the road graph: snapping and shortest paths

pub mod dijkstra;
pub mod nearest;

pub use dijkstra::shortest_path;
pub use nearest::{Snapped, nearest, nearest_node};
