//! Road-network routing for the Foxhole world map viewer.
//!
//! The crate has two halves:
//!
//! - an offline compiler ([`loading`]) that turns the SVG line art of the road
//!   network into a weighted undirected graph and persists it as an adjacency
//!   document;
//! - a runtime ([`store`], [`routing`], [`projection`]) that loads the document
//!   once, snaps map clicks to the nearest road node, computes shortest paths
//!   and projects them back into the viewer's coordinate space.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod projection;
pub mod routing;
pub mod store;

pub use error::Error;
pub use loading::{CompileConfig, IngestionError, compile_file};
pub use model::{DisplayPoint, NodeId, PathResult, RoadGraph, RoadNetwork, VectorPoint};
pub use projection::{CoordinateProjector, FOXHOLE_PROJECTION};
pub use routing::{nearest, shortest_path};
pub use store::GraphStore;

/// Edge weight: Euclidean length of a road segment in vector-space units
pub type Distance = f64;
