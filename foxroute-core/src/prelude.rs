pub use crate::Distance;
pub use crate::Error;

// Offline compilation
pub use crate::loading::{
    CompileConfig, IngestionError, compile_document, compile_file, read_adjacency,
    write_adjacency,
};

// Graph model
pub use crate::model::{
    AdjacencyDocument, DisplayPoint, NodeId, PathEdge, PathResult, RoadGraph, RoadNetwork,
    VectorPoint,
};

// Runtime queries
pub use crate::projection::{
    CoordinateProjector, FOXHOLE_PROJECTION, path_to_geojson, project_path,
};
pub use crate::routing::{Snapped, nearest, nearest_node, shortest_path};
pub use crate::store::GraphStore;
